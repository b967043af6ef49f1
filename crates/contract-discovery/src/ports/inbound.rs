//! # Inbound Ports
//!
//! Per-round lifecycle the hosting consensus runtime drives.

use crate::domain::{DiscoveryObservation, DiscoveryResult, Observation, Outcome, Query};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Contract discovery API - inbound port.
///
/// The runtime calls `observation` on every node, broadcasts the results,
/// admits each one through `validate_observation` and finally hands the
/// admitted set to `outcome`.
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Build the round query. Discovery does not use the query phase.
    fn query(&self, prior: Option<&Outcome>) -> Query;

    /// Produce this node's observation for the round.
    async fn observation(
        &self,
        cancel: &CancellationToken,
        prior: Option<&Outcome>,
        query: &Query,
    ) -> DiscoveryResult<Observation>;

    /// Admit or reject a peer observation.
    fn validate_observation(
        &self,
        prior: Option<&Outcome>,
        query: &Query,
        observation: &DiscoveryObservation,
    ) -> DiscoveryResult<()>;

    /// Aggregate admitted observations and dispatch the commit.
    async fn outcome(
        &self,
        cancel: &CancellationToken,
        prior: Option<&Outcome>,
        query: &Query,
        observations: &[DiscoveryObservation],
    ) -> DiscoveryResult<Outcome>;
}
