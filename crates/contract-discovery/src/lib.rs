//! # Contract Discovery
//!
//! Byzantine-fault-tolerant discovery of cross-chain bridge contracts.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every node of an oracle network:
//! - discovers bridge contract addresses on the chains it is authorized to read
//! - submits them as a per-round observation
//! - aggregates all admitted observations with nested `2f+1` quorums
//! - commits the agreed set into its contract reader, one commit at a time
//!
//! ## Quorum Rules
//!
//! | Value | Threshold |
//! |-------|-----------|
//! | fChain per chain | `2 * f_role_don + 1` identical reports |
//! | Destination-scoped address | `2 * fChain[dest] + 1` identical reports |
//! | Chain-scoped address | `2 * fChain[chain] + 1` identical reports |
//!
//! Cells short of quorum are omitted, never defaulted.
//!
//! ## Module Structure
//!
//! ```text
//! contract-discovery/
//! ├── domain/          # ContractName, Observation, errors, invariants
//! ├── algorithms/      # QuorumAggregator, ObservationValidator
//! ├── ports/           # DiscoveryApi, ChainConfigSource, ContractReader
//! ├── adapters/        # StaticChainConfigSource, InMemoryContractReader
//! ├── service/         # DiscoveryProcessor
//! └── syncer.rs        # ReaderSyncer (single-flight commit)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod syncer;

// Re-exports
pub use adapters::{InMemoryContractReader, StaticChainConfigSource};
pub use algorithms::{
    consensus_value, AggregatedObservation, ObservationValidator, QuorumAggregator,
};
pub use config::{
    ConfigError, DiscoveryConfig, ScopePolicy, DEFAULT_SYNC_TIMEOUT_SECS, MAX_F_ROLE_DON,
};
pub use domain::{
    cell_count, empty_contract_addresses, invariant_positive_f_chain, two_f_plus_one,
    ContractAddresses, ContractName, ContractScope, DiscoveryError, DiscoveryObservation,
    DiscoveryResult, FChain, Observation, Outcome, Query, ValidationError,
};
pub use ports::{ChainConfig, ChainConfigSource, ContractReader, DiscoveryApi};
pub use service::{DiscoveryDependencies, DiscoveryProcessor};
pub use syncer::{ReaderSyncer, SyncStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
