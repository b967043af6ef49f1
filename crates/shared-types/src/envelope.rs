//! # `AttributedObservation` Envelope
//!
//! Wrapper the round runtime uses to deliver a peer's observation.
//!
//! ## Security Properties
//!
//! - **Envelope Authority**: `oracle_id` is set by the runtime after
//!   authenticating the sender and is the sole source of truth for identity.
//! - **Untrusted Payload**: the wrapped observation is peer input and MUST be
//!   validated before it is admitted to consensus.

use crate::entities::OracleId;
use serde::{Deserialize, Serialize};

/// An observation tagged with the identity of its submitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributedObservation<T> {
    /// The oracle that submitted the observation.
    pub oracle_id: OracleId,
    /// The submitted payload.
    pub observation: T,
}

impl<T> AttributedObservation<T> {
    /// Attribute an observation to an oracle.
    pub fn new(oracle_id: OracleId, observation: T) -> Self {
        Self {
            oracle_id,
            observation,
        }
    }
}
