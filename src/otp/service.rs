//! High-level orchestrator — owns the registry and the refresh loop,
//! exposes the operations the shell wires to the UI: startup load,
//! import, the event stream, and on-demand tokens for the clipboard.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::otp::core;
use crate::otp::registry::ServiceRegistry;
use crate::otp::scheduler::{RefreshReceiver, RefreshScheduler};
use crate::otp::storage;
use crate::otp::types::*;

/// Thread-safe service state shared with the embedding shell.
pub type AuthServiceState = Arc<Mutex<AuthService>>;

/// Central authenticator service.
pub struct AuthService {
    registry: Arc<Mutex<ServiceRegistry>>,
    data_path: Option<PathBuf>,
    refresh: Option<tokio::task::JoinHandle<()>>,
}

impl AuthService {
    /// Create a service persisting to the platform data directory,
    /// wrapped for shared shell state.
    pub fn new() -> AuthServiceState {
        Arc::new(Mutex::new(Self::with_optional_path(
            storage::default_data_path(),
        )))
    }

    /// Create a service persisting to an explicit file path.
    pub fn with_data_path(path: impl Into<PathBuf>) -> AuthServiceState {
        Arc::new(Mutex::new(Self::with_optional_path(Some(path.into()))))
    }

    fn with_optional_path(data_path: Option<PathBuf>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(ServiceRegistry::new())),
            data_path,
            refresh: None,
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Loading and import
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Load the persisted data set at startup, if one exists. Returns
    /// whether a set was activated; a missing file is the normal
    /// first-run state and leaves the registry Idle.
    pub async fn load_persisted(&mut self) -> Result<bool, AuthError> {
        let Some(path) = self.data_path.clone() else {
            return Ok(false);
        };
        let Some(bytes) = storage::read_if_present(&path)? else {
            return Ok(false);
        };
        let set = ServiceRegistry::load(&bytes)?;
        let count = set.len();
        self.registry.lock().await.replace(set);
        log::info!("loaded {} service(s) from {}", count, path.display());
        Ok(true)
    }

    /// Import a document chosen by the user: parse and validate, activate
    /// it wholesale, then persist it. A failed parse leaves the active
    /// set untouched.
    pub async fn import(&mut self, bytes: &[u8]) -> Result<usize, AuthError> {
        let set = ServiceRegistry::load(bytes)?;
        let count = set.len();
        self.registry.lock().await.replace(set.clone());
        if let Some(path) = &self.data_path {
            storage::save(path, &set)?;
        }
        log::info!("imported {} service(s)", count);
        Ok(count)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Refresh loop
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Start the 1 Hz refresh loop, handing back the event stream for
    /// the presentation layer. Returns `None` if already running.
    pub fn start_refresh(&mut self) -> Option<RefreshReceiver> {
        if self.refresh.is_some() {
            return None;
        }
        let (scheduler, rx) = RefreshScheduler::new(Arc::clone(&self.registry));
        self.refresh = Some(scheduler.spawn());
        Some(rx)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Queries
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Raw (unformatted) token for the service at `index`, recomputed at
    /// the current instant — what the clipboard collaborator receives.
    pub async fn token_for(&self, index: usize) -> Result<String, AuthError> {
        let registry = self.registry.lock().await;
        let service = registry.service(index).ok_or_else(|| {
            AuthError::new(AuthErrorKind::NotFound, format!("no service at index {}", index))
        })?;
        core::token_now(service)
    }

    /// Snapshot of the active data set for rendering the service list.
    pub async fn current(&self) -> Option<DataSet> {
        self.registry.lock().await.current().cloned()
    }

    pub async fn service_count(&self) -> usize {
        self.registry.lock().await.service_count()
    }

    pub async fn is_loaded(&self) -> bool {
        self.registry.lock().await.is_loaded()
    }
}
