//! # Domain Module
//!
//! Core domain types for Contract Discovery.

pub mod contract_name;
pub mod errors;
pub mod invariants;
pub mod observation;

pub use contract_name::*;
pub use errors::*;
pub use invariants::*;
pub use observation::*;
