//! Static Chain Config Adapter
//!
//! Implements `ChainConfigSource` from a snapshot of per-chain configs.
//! The snapshot can be replaced at runtime, e.g. after a home-chain poll.

use crate::domain::FChain;
use crate::ports::outbound::{ChainConfig, ChainConfigSource};
use parking_lot::RwLock;
use shared_types::{ChainSelector, PeerId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Chain config source backed by an in-memory snapshot.
pub struct StaticChainConfigSource {
    configs: RwLock<HashMap<ChainSelector, ChainConfig>>,
}

impl StaticChainConfigSource {
    /// Create a source from per-chain configs.
    pub fn new(configs: HashMap<ChainSelector, ChainConfig>) -> Self {
        Self {
            configs: RwLock::new(configs),
        }
    }

    /// Replace the snapshot.
    pub fn update(&self, configs: HashMap<ChainSelector, ChainConfig>) {
        debug!(chains = configs.len(), "[discovery] Chain configs replaced");
        *self.configs.write() = configs;
    }

    /// Insert or replace the config of one chain.
    pub fn set_chain(&self, chain: ChainSelector, config: ChainConfig) {
        self.configs.write().insert(chain, config);
    }
}

impl Default for StaticChainConfigSource {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl ChainConfigSource for StaticChainConfigSource {
    fn get_f_chain(&self) -> Result<FChain, String> {
        Ok(self
            .configs
            .read()
            .iter()
            .map(|(chain, config)| (*chain, config.f_chain))
            .collect())
    }

    fn get_supported_chains_for_peer(
        &self,
        peer_id: &PeerId,
    ) -> Result<HashSet<ChainSelector>, String> {
        Ok(self
            .configs
            .read()
            .iter()
            .filter(|(_, config)| config.supported_nodes.contains(peer_id))
            .map(|(chain, _)| *chain)
            .collect())
    }

    fn get_all_chain_configs(&self) -> Result<HashMap<ChainSelector, ChainConfig>, String> {
        Ok(self.configs.read().clone())
    }
}
