//! Configuration for an exchange instance.

use serde::{Deserialize, Serialize};

use crate::{RegistryId, constants};

/// Configuration for one exchange (matching core) instance.
///
/// `chain_id` scopes the signing digest so a signature for one deployment
/// can never authorize an order on another. `allowed_registries` is the
/// whitelist of proxy-registry instances this exchange will route through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Deployment identifier mixed into the signing digest.
    pub chain_id: u64,
    /// Registries this exchange accepts orders against.
    pub allowed_registries: Vec<RegistryId>,
    /// Upper bound on predicate extradata size, in bytes.
    pub max_extradata_bytes: usize,
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(chain_id: u64, allowed_registries: Vec<RegistryId>) -> Self {
        Self {
            chain_id,
            allowed_registries,
            max_extradata_bytes: constants::DEFAULT_MAX_EXTRADATA_BYTES,
        }
    }

    #[must_use]
    pub fn accepts_registry(&self, registry: RegistryId) -> bool {
        self.allowed_registries.contains(&registry)
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            allowed_registries: Vec::new(),
            max_extradata_bytes: constants::DEFAULT_MAX_EXTRADATA_BYTES,
        }
    }
}
