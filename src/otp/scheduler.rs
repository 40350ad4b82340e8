//! Refresh scheduler — the once-per-second tick behind the token list.
//!
//! Idle until the registry holds a data set, then Active for the rest of
//! the process lifetime. Every tick walks the active services in order:
//! the countdown is recomputed unconditionally (it drives the progress
//! ring), while the formatted token is attached to the event only when it
//! differs from the previously displayed value for that slot.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::otp::core;
use crate::otp::countdown::countdown_at;
use crate::otp::format::format_token;
use crate::otp::registry::ServiceRegistry;
use crate::otp::types::*;

/// Receiving side of the refresh event stream.
pub type RefreshReceiver = mpsc::UnboundedReceiver<RefreshEvent>;

/// Drives the 1 Hz refresh over the registry's active services.
pub struct RefreshScheduler {
    registry: Arc<Mutex<ServiceRegistry>>,
    events: mpsc::UnboundedSender<RefreshEvent>,
    /// Registry epoch the slot state below belongs to.
    slot_epoch: u64,
    /// Last formatted token emitted per slot. Slot identity is positional;
    /// a replaced data set resets every slot.
    displayed: Vec<String>,
}

impl RefreshScheduler {
    /// Create a scheduler over `registry` and the event stream it feeds.
    pub fn new(registry: Arc<Mutex<ServiceRegistry>>) -> (Self, RefreshReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                registry,
                events: tx,
                slot_epoch: 0,
                displayed: Vec::new(),
            },
            rx,
        )
    }

    /// Spawn the tick loop on the runtime.
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // A long tick handler delays the next tick; ticks are never
            // dropped or fired twice to catch up.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.tick(core::current_unix_time()).await;
            }
        })
    }

    /// One refresh pass over the active services at `unix_seconds`.
    ///
    /// Runs to completion over every service; a failure in one service
    /// never stops the others.
    pub async fn tick(&mut self, unix_seconds: u64) {
        let registry = self.registry.lock().await;
        let Some(set) = registry.current() else {
            return; // Idle: nothing loaded yet
        };

        if registry.epoch() != self.slot_epoch {
            self.slot_epoch = registry.epoch();
            self.displayed = vec![String::new(); set.services.len()];
        }

        for (index, service) in set.services.iter().enumerate() {
            let cd = countdown_at(service.otp.period, unix_seconds);
            let token = match core::token_at(service, unix_seconds) {
                Ok(token) => token,
                Err(e) => {
                    log::debug!("token generation failed for '{}': {}", service.name, e);
                    String::new()
                }
            };
            let formatted = format_token(&token, service.otp.digits);
            let changed = self.displayed[index] != formatted;
            if changed {
                self.displayed[index] = formatted.clone();
            }
            let _ = self.events.send(RefreshEvent {
                index,
                seconds_remaining: cd.seconds_remaining,
                progress_percent: cd.progress_percent,
                formatted_token: changed.then_some(formatted),
            });
        }
    }
}
