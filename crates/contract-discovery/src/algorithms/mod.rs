//! # Algorithms Module
//!
//! Quorum aggregation and peer observation validation.

pub mod quorum;
pub mod validation;

pub use quorum::{consensus_value, AggregatedObservation, QuorumAggregator};
pub use validation::ObservationValidator;
