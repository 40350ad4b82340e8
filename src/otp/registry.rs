//! Ordered service collection: parse, validate, whole-set replacement.

use crate::otp::types::*;

/// Owns the active data set.
///
/// The set is only ever swapped wholesale — readers see the previous set
/// or the new one, never a mix. Each swap bumps an epoch so the refresh
/// loop can discard its per-slot display state.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    data: Option<DataSet>,
    epoch: u64,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw JSON bytes into a data set and validate each service's
    /// OTP parameters. Does not touch the active set; pair with
    /// [`replace`](Self::replace) to activate the result.
    pub fn load(bytes: &[u8]) -> Result<DataSet, AuthError> {
        let set: DataSet = serde_json::from_slice(bytes).map_err(|e| {
            AuthError::new(AuthErrorKind::ParseError, "malformed services document")
                .with_detail(e.to_string())
        })?;
        for (index, service) in set.services.iter().enumerate() {
            if service.otp.period == 0 {
                return Err(AuthError::new(
                    AuthErrorKind::InvalidPeriod,
                    format!("service {} ('{}') has period 0", index, service.name),
                ));
            }
        }
        Ok(set)
    }

    /// Activate a new data set, discarding the previous one.
    pub fn replace(&mut self, set: DataSet) {
        self.data = Some(set);
        self.epoch += 1;
    }

    /// The active data set, if one has been loaded.
    pub fn current(&self) -> Option<&DataSet> {
        self.data.as_ref()
    }

    /// Bumped on every [`replace`](Self::replace).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a data set has ever been activated.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn service_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.services.len())
    }

    /// Service at a position in the active set.
    pub fn service(&self, index: usize) -> Option<&Service> {
        self.data.as_ref().and_then(|d| d.services.get(index))
    }
}
