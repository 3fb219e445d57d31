//! Service state management.

use std::sync::Arc;

use crate::optimizer::KitOptimizer;
use crate::policy::{WearLimitError, WearLimitTable};

/// Shared, read-only service state.
///
/// Holds the wear table loaded at startup. Requests never mutate it, so
/// no lock is needed.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Optimizer bound to the configured wear table.
    pub optimizer: KitOptimizer,
    /// Fingerprint of the wear table, reported by the health endpoint.
    limits_fingerprint: Arc<str>,
}

impl ServiceState {
    /// Create state from a wear table.
    pub fn new(limits: WearLimitTable) -> Self {
        let limits_fingerprint: Arc<str> = limits.fingerprint().into();
        Self {
            optimizer: KitOptimizer::new(Arc::new(limits)),
            limits_fingerprint,
        }
    }

    /// Create state with an explicit optimizer (e.g. one bound to a dedicated pool).
    pub fn with_optimizer(optimizer: KitOptimizer) -> Self {
        let limits_fingerprint: Arc<str> = optimizer.limits().fingerprint().into();
        Self {
            optimizer,
            limits_fingerprint,
        }
    }

    /// Create state from environment variables.
    ///
    /// Reads `KIT_WEAR_LIMITS` / `KIT_WEAR_LIMITS_PATH` (see [`WearLimitTable::from_env`]).
    pub fn from_env() -> Result<Self, WearLimitError> {
        Ok(Self::new(WearLimitTable::from_env()?))
    }

    /// The configured wear table.
    pub fn limits(&self) -> &WearLimitTable {
        self.optimizer.limits()
    }

    /// Fingerprint of the configured wear table.
    pub fn limits_fingerprint(&self) -> &str {
        &self.limits_fingerprint
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new(WearLimitTable::default())
    }
}
