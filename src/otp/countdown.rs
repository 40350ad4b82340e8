//! Countdown within the current OTP validity window.

use serde::{Deserialize, Serialize};

/// Time remaining and progress through the current period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    /// Whole seconds until the token rolls over, in `[1, period]`.
    pub seconds_remaining: u32,
    /// Elapsed fraction of the window as a percentage, in `[0, 100)`.
    /// Resets to 0 at each window boundary.
    pub progress_percent: f64,
}

/// Countdown for `period` at an explicit unix timestamp.
pub fn countdown_at(period: u32, unix_seconds: u64) -> Countdown {
    let p = period as u64;
    let seconds_remaining = (p - (unix_seconds % p)) as u32;
    let progress_percent = 100.0 / period as f64 * (period - seconds_remaining) as f64;
    Countdown {
        seconds_remaining,
        progress_percent,
    }
}

/// Rotation of the two halves of the countdown ring, in degrees.
///
/// The ring is drawn as two semicircles: the right half sweeps during the
/// first 50% of the window, then holds at 180° while the left half sweeps
/// through the second 50%. Presentation collaborators may reinterpret this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSweep {
    pub left_degrees: f64,
    pub right_degrees: f64,
}

/// Two-sided arc sweep for a progress percentage.
pub fn arc_sweep(progress_percent: f64) -> ArcSweep {
    if progress_percent <= 50.0 {
        ArcSweep {
            left_degrees: 0.0,
            right_degrees: percentage_to_degrees(progress_percent),
        }
    } else {
        ArcSweep {
            left_degrees: percentage_to_degrees(progress_percent - 50.0),
            right_degrees: 180.0,
        }
    }
}

fn percentage_to_degrees(percentage: f64) -> f64 {
    percentage / 100.0 * 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start() {
        let cd = countdown_at(30, 0);
        assert_eq!(cd.seconds_remaining, 30);
        assert_eq!(cd.progress_percent, 0.0);
    }

    #[test]
    fn last_second_of_window() {
        let cd = countdown_at(30, 29);
        assert_eq!(cd.seconds_remaining, 1);
        assert!(cd.progress_percent > 96.0 && cd.progress_percent < 100.0);
    }

    #[test]
    fn resets_at_boundary() {
        let cd = countdown_at(30, 60);
        assert_eq!(cd.seconds_remaining, 30);
        assert_eq!(cd.progress_percent, 0.0);
    }

    #[test]
    fn remaining_in_range_and_strictly_decreasing() {
        for t in 0..90u64 {
            let cd = countdown_at(30, t);
            assert!(cd.seconds_remaining >= 1 && cd.seconds_remaining <= 30, "t={}", t);
            assert!(cd.progress_percent >= 0.0 && cd.progress_percent < 100.0, "t={}", t);
            if t % 30 != 29 {
                let next = countdown_at(30, t + 1);
                assert_eq!(next.seconds_remaining, cd.seconds_remaining - 1);
                assert!(next.progress_percent > cd.progress_percent);
            }
        }
    }

    #[test]
    fn non_default_period() {
        let cd = countdown_at(60, 45);
        assert_eq!(cd.seconds_remaining, 15);
        assert_eq!(cd.progress_percent, 75.0);
    }

    // ── Arc sweep ────────────────────────────────────────────────

    #[test]
    fn arc_first_half_sweeps_right() {
        let arc = arc_sweep(25.0);
        assert_eq!(arc.left_degrees, 0.0);
        assert_eq!(arc.right_degrees, 90.0);
    }

    #[test]
    fn arc_half_way() {
        let arc = arc_sweep(50.0);
        assert_eq!(arc.left_degrees, 0.0);
        assert_eq!(arc.right_degrees, 180.0);
    }

    #[test]
    fn arc_second_half_holds_right() {
        let arc = arc_sweep(75.0);
        assert_eq!(arc.right_degrees, 180.0);
        assert_eq!(arc.left_degrees, 90.0);
    }
}
