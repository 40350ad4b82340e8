//! Core types for the authenticator: service data model, refresh events,
//! and the crate error.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm used for HMAC-based OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha512 => write!(f, "SHA512"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OTP parameters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn default_digits() -> u8 {
    6
}

fn default_period() -> u32 {
    30
}

/// Per-service OTP configuration. Missing fields take the documented
/// defaults (SHA-1, 6 digits, 30 seconds) at deserialization time; they
/// are never re-derived at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpParams {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Code length. 6 and 8 get grouped display formatting.
    #[serde(default = "default_digits")]
    pub digits: u8,
    /// Seconds a code stays valid. Must be > 0; validated once at load.
    #[serde(default = "default_period")]
    pub period: u32,
}

impl Default for OtpParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            digits: default_digits(),
            period: default_period(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Text avatar rendered for a service. Purely presentational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconLabel {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Icon block of a service entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<IconLabel>,
}

/// One configured account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Display label.
    pub name: String,
    /// Base-32 encoded shared secret, possibly containing whitespace.
    /// An empty secret marks a placeholder entry whose token is empty.
    #[serde(default)]
    pub secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub otp: OtpParams,
}

impl Service {
    /// Create a service with default OTP parameters.
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
            icon: None,
            otp: OtpParams::default(),
        }
    }

    /// Builder: set the hash algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.otp.algorithm = algorithm;
        self
    }

    /// Builder: set the code length.
    pub fn with_digits(mut self, digits: u8) -> Self {
        self.otp.digits = digits;
        self
    }

    /// Builder: set the period in seconds.
    pub fn with_period(mut self, period: u32) -> Self {
        self.otp.period = period;
        self
    }

    /// The secret with all whitespace removed, uppercased.
    pub fn normalised_secret(&self) -> String {
        self.secret
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    }

    /// Whether the entry carries a usable secret.
    pub fn has_secret(&self) -> bool {
        !self.normalised_secret().is_empty()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Data set
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The full imported collection. Services keep their document order and
/// are addressed by position; the set is only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub services: Vec<Service>,
}

impl DataSet {
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Refresh event
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Per-service update emitted on every scheduler tick.
///
/// The countdown fields are always present (they drive the progress
/// ring); `formatted_token` is attached only when the displayed token
/// actually changed, so the presentation layer never redraws an
/// unchanged code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshEvent {
    /// Position of the service in the active data set.
    pub index: usize,
    /// Whole seconds until the token rolls over, in `[1, period]`.
    pub seconds_remaining: u32,
    /// Elapsed fraction of the window as a percentage, in `[0, 100)`.
    pub progress_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_token: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthErrorKind {
    /// Malformed base-32 secret; confined to one service's generation.
    InvalidSecret,
    /// Zero period found while validating a loaded document.
    InvalidPeriod,
    /// Malformed persisted or imported JSON.
    ParseError,
    /// Data file could not be read or written.
    IoError,
    /// No service at the requested index.
    NotFound,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for String {
    fn from(e: AuthError) -> String {
        e.to_string()
    }
}
