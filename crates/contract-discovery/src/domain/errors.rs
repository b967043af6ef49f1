//! # Domain Errors
//!
//! Error types for Contract Discovery.

use super::contract_name::ContractName;
use shared_types::{ChainSelector, OracleId};
use std::time::Duration;
use thiserror::Error;

/// Reasons a peer observation is refused admission to consensus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fault tolerance must be strictly positive.
    #[error("fChain for chain {chain} is not positive: {f}")]
    NonPositiveFChain {
        /// Raw chain selector value
        chain: u64,
        /// Reported fault tolerance
        f: i32,
    },

    /// Destination-scoped role observed by an oracle not serving the destination.
    #[error(
        "oracle {oracle} is not allowed to observe contract ({contract}) on the destination chain {dest}"
    )]
    DestinationNotAllowed {
        /// Submitting oracle
        oracle: OracleId,
        /// Offending role
        contract: ContractName,
        /// Destination chain
        dest: ChainSelector,
    },

    /// Chain-scoped role observed on a chain the oracle does not serve.
    #[error("oracle {oracle} is not allowed to observe chain {chain} (contract {contract})")]
    ChainNotAllowed {
        /// Submitting oracle
        oracle: OracleId,
        /// Offending role
        contract: ContractName,
        /// Offending chain
        chain: ChainSelector,
    },

    /// Dependent role reported without the role it is derived from.
    #[error("oracle {oracle} observed {contract} on chain {chain} without a matching {depends_on}")]
    MissingDependency {
        /// Submitting oracle
        oracle: OracleId,
        /// Dependent role
        contract: ContractName,
        /// Role that must be co-present
        depends_on: ContractName,
        /// Offending chain
        chain: ChainSelector,
    },

    /// Fault tolerance reported for a chain the oracle does not serve.
    #[error("oracle {oracle} is not allowed to observe fChain for chain {chain}")]
    FChainNotAllowed {
        /// Submitting oracle
        oracle: OracleId,
        /// Offending chain
        chain: ChainSelector,
    },
}

impl ValidationError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveFChain { .. } => "non_positive_f_chain",
            ValidationError::DestinationNotAllowed { .. } => "destination_not_allowed",
            ValidationError::ChainNotAllowed { .. } => "chain_not_allowed",
            ValidationError::MissingDependency { .. } => "missing_dependency",
            ValidationError::FChainNotAllowed { .. } => "f_chain_not_allowed",
        }
    }
}

/// Contract Discovery error types.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Fault tolerances could not be read.
    #[error("unable to get fChain: {0}")]
    FChainUnavailable(String),

    /// Chain configs could not be read.
    #[error("unable to get chain configs: {0}")]
    ChainConfigsUnavailable(String),

    /// Oracle has no known peer identity.
    #[error("no peer ID found for Oracle {0}")]
    NoPeerId(OracleId),

    /// Authorized chain set could not be read.
    #[error("unable to get supported chains for Oracle {oracle}: {reason}")]
    SupportedChainsUnavailable {
        /// Oracle whose chains were requested
        oracle: OracleId,
        /// Collaborator error
        reason: String,
    },

    /// Reader failed to discover contracts.
    #[error("unable to discover contracts: {0}")]
    DiscoveryFailed(String),

    /// Peer observation rejected.
    #[error(transparent)]
    InvalidObservation(#[from] ValidationError),

    /// Outcome called without any admitted observation.
    #[error("no observations to aggregate")]
    NoObservations,

    /// Reader failed to commit the agreed contracts.
    #[error("contract sync failed: {0}")]
    SyncFailed(String),

    /// Commit did not finish in time.
    #[error("contract sync timed out after {0:?}")]
    SyncTimeout(Duration),

    /// Caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for discovery operations
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
