//! # Core Identifiers
//!
//! ## Clusters
//!
//! - **Chains**: `ChainSelector`
//! - **Addresses**: `UnknownAddress`
//! - **Oracle network**: `OracleId`, `PeerId`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: CHAINS
// =============================================================================

/// Opaque identifier of a blockchain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ChainSelector(pub u64);

impl ChainSelector {
    /// Raw selector value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainSelector {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainSelector({})", self.0)
    }
}

// =============================================================================
// CLUSTER B: ADDRESSES
// =============================================================================

/// Chain-agnostic, variable-length on-chain address.
///
/// Equality is byte-exact; no checksum or length normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct UnknownAddress(pub Vec<u8>);

impl UnknownAddress {
    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check if the address has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for UnknownAddress {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for UnknownAddress {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for UnknownAddress {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl fmt::Display for UnknownAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

// =============================================================================
// CLUSTER C: ORACLE NETWORK
// =============================================================================

/// Position of an oracle inside the DON, as assigned by the round runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct OracleId(pub u8);

impl fmt::Display for OracleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// P2P identity of an oracle node (32-byte public key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PeerId(pub [u8; 32]);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
