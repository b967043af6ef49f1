//! # Adapters Module
//!
//! In-memory implementations of the outbound ports.

pub mod chain_config;
pub mod contract_reader;

pub use chain_config::StaticChainConfigSource;
pub use contract_reader::InMemoryContractReader;
