//! # Contract Roles
//!
//! Bridge contract roles collected per chain, and the scope each role is
//! observed in.

use serde::{Deserialize, Serialize};
use shared_types::{ChainSelector, UnknownAddress};
use std::collections::HashMap;
use std::fmt;

/// Role of a bridge contract whose address is discovered per chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractName {
    /// Source-side entry point; read from the destination chain's registry.
    OnRamp,
    /// Per-sender nonce tracking.
    NonceManager,
    /// Fee and price registry.
    FeeQuoter,
    /// Risk management remote.
    RMNRemote,
    /// Message router.
    Router,
}

impl ContractName {
    /// Every known role, in a stable order.
    pub const ALL: [ContractName; 5] = [
        ContractName::OnRamp,
        ContractName::NonceManager,
        ContractName::FeeQuoter,
        ContractName::RMNRemote,
        ContractName::Router,
    ];

    /// Role name as it appears in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::OnRamp => "OnRamp",
            ContractName::NonceManager => "NonceManager",
            ContractName::FeeQuoter => "FeeQuoter",
            ContractName::RMNRemote => "RMNRemote",
            ContractName::Router => "Router",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a role's addresses are read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractScope {
    /// Read from the destination chain, whatever chain the entry is keyed by.
    ///
    /// Authorization and quorum use the destination chain.
    Destination,
    /// Read on the chain the entry is keyed by.
    #[default]
    Chain,
}

/// Addresses keyed by role, then by chain.
pub type ContractAddresses = HashMap<ContractName, HashMap<ChainSelector, UnknownAddress>>;

/// Build a `ContractAddresses` holding every role with no cells.
pub fn empty_contract_addresses() -> ContractAddresses {
    ContractName::ALL
        .iter()
        .map(|name| (*name, HashMap::new()))
        .collect()
}

/// Number of `(role, chain)` cells in an address set.
pub fn cell_count(addresses: &ContractAddresses) -> usize {
    addresses.values().map(HashMap::len).sum()
}
