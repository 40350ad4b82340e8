//! Authenticator core: sub-modules.

pub mod core;
pub mod countdown;
pub mod format;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod storage;
pub mod types;

// Re-export top-level items for convenience.
pub use countdown::{arc_sweep, countdown_at, ArcSweep, Countdown};
pub use format::format_token;
pub use registry::ServiceRegistry;
pub use scheduler::{RefreshReceiver, RefreshScheduler};
pub use service::{AuthService, AuthServiceState};
pub use types::*;
