//! # Shared Types Crate
//!
//! Primitive identifiers shared by every crate of the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chain selectors, addresses and oracle
//!   identities are defined once, here.
//! - **Envelope Identity**: an `AttributedObservation<T>` carries the
//!   submitter's `OracleId`; payloads MUST NOT repeat it.

pub mod entities;
pub mod envelope;

pub use entities::*;
pub use envelope::AttributedObservation;
