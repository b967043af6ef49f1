//! # Round Messages
//!
//! Query, observation and outcome exchanged in one discovery round.

use super::contract_name::{ContractAddresses, ContractName};
use serde::{Deserialize, Serialize};
use shared_types::{AttributedObservation, ChainSelector, UnknownAddress};
use std::collections::HashMap;

/// Fault tolerance per chain.
///
/// Signed so that malformed peer input can be represented and rejected.
pub type FChain = HashMap<ChainSelector, i32>;

/// Query phase payload. Discovery does not use the query phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {}

/// Round result marker.
///
/// Carries no state between rounds; producing it triggers the asynchronous
/// contract commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {}

/// One node's view of the network for a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Fault tolerance per chain, as read from the chain config source.
    pub f_chain: FChain,
    /// Discovered addresses per role and chain.
    pub addresses: ContractAddresses,
}

impl Observation {
    /// Create an observation.
    pub fn new(f_chain: FChain, addresses: ContractAddresses) -> Self {
        Self { f_chain, addresses }
    }

    /// Address observed for `(name, chain)`, if any.
    pub fn address(&self, name: ContractName, chain: ChainSelector) -> Option<&UnknownAddress> {
        self.addresses.get(&name).and_then(|by_chain| by_chain.get(&chain))
    }

    /// Check if the observation carries neither fault tolerances nor addresses.
    pub fn is_empty(&self) -> bool {
        self.f_chain.is_empty() && self.addresses.values().all(HashMap::is_empty)
    }
}

/// Observation tagged with its submitter.
pub type DiscoveryObservation = AttributedObservation<Observation>;
