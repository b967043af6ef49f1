//! # Outbound Ports
//!
//! Traits for external dependencies (home-chain configuration, contract reader).
//!
//! Collaborator errors are plain strings; the processor maps them into
//! [`DiscoveryError`](crate::domain::DiscoveryError) variants.

use crate::domain::{ContractAddresses, FChain};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{ChainSelector, PeerId};
use std::collections::{HashMap, HashSet};

/// Per-chain configuration published on the home chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Fault tolerance of the chain.
    pub f_chain: i32,
    /// Peers authorized to read the chain.
    pub supported_nodes: HashSet<PeerId>,
}

impl ChainConfig {
    /// Create a chain config.
    pub fn new(f_chain: i32, supported_nodes: impl IntoIterator<Item = PeerId>) -> Self {
        Self {
            f_chain,
            supported_nodes: supported_nodes.into_iter().collect(),
        }
    }
}

/// Source of per-chain fault tolerance and peer authorization - outbound port.
pub trait ChainConfigSource: Send + Sync {
    /// Fault tolerance per known chain.
    fn get_f_chain(&self) -> Result<FChain, String>;

    /// Chains the given peer is authorized to observe.
    fn get_supported_chains_for_peer(
        &self,
        peer_id: &PeerId,
    ) -> Result<HashSet<ChainSelector>, String>;

    /// Every chain config.
    fn get_all_chain_configs(&self) -> Result<HashMap<ChainSelector, ChainConfig>, String>;
}

/// On-chain contract discovery and the live contract bindings - outbound port.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Discover contract addresses for `dest_chain`, limited to chains in `scope`.
    async fn discover_contracts(
        &self,
        dest_chain: ChainSelector,
        scope: &HashSet<ChainSelector>,
    ) -> Result<ContractAddresses, String>;

    /// Bind the agreed contract addresses.
    async fn sync(&self, contracts: ContractAddresses) -> Result<(), String>;
}
