//! Discovery Service - per-round lifecycle
//!
//! # Architecture
//! - Observation reads the home-chain config and the local contract reader
//! - Peer observations are admitted by [`ObservationValidator`]
//! - Outcome runs [`QuorumAggregator`] and commits through [`ReaderSyncer`]
//!   on a detached task, so round latency never depends on reader I/O

use crate::algorithms::{ObservationValidator, QuorumAggregator};
use crate::config::{ConfigError, DiscoveryConfig};
use crate::domain::{
    cell_count, ContractAddresses, DiscoveryError, DiscoveryObservation, DiscoveryResult, FChain,
    Observation, Outcome, Query,
};
use crate::metrics;
use crate::ports::{ChainConfigSource, ContractReader, DiscoveryApi};
use crate::syncer::{ReaderSyncer, SyncStatus};
use async_trait::async_trait;
use shared_types::{ChainSelector, OracleId, PeerId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument, Span};

/// Contract discovery processor.
pub struct DiscoveryProcessor<R, C>
where
    R: ContractReader + 'static,
    C: ChainConfigSource,
{
    syncer: Option<Arc<ReaderSyncer<R>>>,
    chain_config: Arc<C>,
    oracle_peers: HashMap<OracleId, PeerId>,
    oracle_id: OracleId,
    config: DiscoveryConfig,
    validator: ObservationValidator,
    aggregator: QuorumAggregator,
    span: Span,
}

/// Dependencies for DiscoveryProcessor
pub struct DiscoveryDependencies<R: ContractReader + 'static, C> {
    /// Commit gate over the contract reader; `None` on nodes without
    /// discovery capability.
    ///
    /// Every processor over the same reader must share one syncer so that
    /// at most one commit runs against that reader.
    pub syncer: Option<Arc<ReaderSyncer<R>>>,
    /// Home-chain configuration.
    pub chain_config: Arc<C>,
    /// Peer identity of every oracle in the DON.
    pub oracle_peers: HashMap<OracleId, PeerId>,
    /// This node's oracle identity.
    pub oracle_id: OracleId,
    /// Processor configuration.
    pub config: DiscoveryConfig,
}

impl<R, C> DiscoveryProcessor<R, C>
where
    R: ContractReader + 'static,
    C: ChainConfigSource,
{
    /// Create a new DiscoveryProcessor
    pub fn new(deps: DiscoveryDependencies<R, C>) -> Result<Self, ConfigError> {
        deps.config.validate()?;

        let dest_chain = deps.config.dest_chain;
        let policy = deps.config.scope_policy.clone();
        let span = info_span!("discovery", oracle = %deps.oracle_id, dest = %dest_chain);

        Ok(Self {
            syncer: deps.syncer,
            chain_config: deps.chain_config,
            oracle_peers: deps.oracle_peers,
            oracle_id: deps.oracle_id,
            validator: ObservationValidator::new(dest_chain, policy.clone()),
            aggregator: QuorumAggregator::new(dest_chain, deps.config.f_role_don, policy),
            config: deps.config,
            span,
        })
    }

    /// Destination chain served by this processor.
    pub fn dest_chain(&self) -> ChainSelector {
        self.config.dest_chain
    }

    /// This node's oracle identity.
    pub fn oracle_id(&self) -> OracleId {
        self.oracle_id
    }

    /// Whether this node can discover and commit contracts.
    pub fn has_reader(&self) -> bool {
        self.syncer.is_some()
    }

    /// Chains an oracle is authorized to observe.
    fn supported_chains(&self, oracle: OracleId) -> DiscoveryResult<HashSet<ChainSelector>> {
        let peer_id = self
            .oracle_peers
            .get(&oracle)
            .ok_or(DiscoveryError::NoPeerId(oracle))?;

        self.chain_config
            .get_supported_chains_for_peer(peer_id)
            .map_err(|reason| DiscoveryError::SupportedChainsUnavailable { oracle, reason })
    }

    async fn observe(&self, cancel: &CancellationToken) -> DiscoveryResult<Observation> {
        let f_chain = self
            .chain_config
            .get_f_chain()
            .map_err(DiscoveryError::FChainUnavailable)?;

        self.chain_config
            .get_all_chain_configs()
            .map_err(DiscoveryError::ChainConfigsUnavailable)?;

        let supported = self.supported_chains(self.oracle_id)?;

        // Peers reject fChain entries for chains we are not authorized on
        let f_chain: FChain = f_chain
            .into_iter()
            .filter(|(chain, _)| supported.contains(chain))
            .collect();

        let addresses = match &self.syncer {
            Some(syncer) => {
                let reader = syncer.reader();
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(DiscoveryError::Cancelled),
                    res = reader.discover_contracts(self.config.dest_chain, &supported) => {
                        res.map_err(DiscoveryError::DiscoveryFailed)?
                    }
                }
            }
            None => {
                debug!("[discovery] No contract reader, observing fChain only");
                ContractAddresses::new()
            }
        };

        Ok(Observation::new(f_chain, addresses))
    }

    fn admit(&self, ao: &DiscoveryObservation) -> DiscoveryResult<()> {
        let supported = self.supported_chains(ao.oracle_id)?;
        self.validator.validate(ao, &supported)?;
        Ok(())
    }

    /// Commit agreed contracts on a detached task.
    ///
    /// Returns `None` when this node has no reader. The task resolves to the
    /// commit result after logging it.
    fn dispatch_sync(
        &self,
        cancel: &CancellationToken,
        contracts: ContractAddresses,
    ) -> Option<JoinHandle<DiscoveryResult<SyncStatus>>> {
        let Some(syncer) = self.syncer.clone() else {
            debug!("[discovery] No contract reader, skipping commit");
            return None;
        };
        let cancel = cancel.child_token();
        let timeout = self.config.sync_timeout();

        let task = async move {
            let result = tokio::time::timeout(timeout, syncer.sync(&cancel, contracts))
                .await
                .unwrap_or(Err(DiscoveryError::SyncTimeout(timeout)));

            match &result {
                Ok(SyncStatus::Completed) => info!("[discovery] Contracts committed"),
                Ok(SyncStatus::AlreadySyncing) => {
                    debug!("[discovery] Previous commit still running, skipped")
                }
                Err(e) => error!(error = %e, "[discovery] Contract commit failed"),
            }
            result
        };

        Some(tokio::spawn(task.instrument(self.span.clone())))
    }
}

fn rejection_reason(err: &DiscoveryError) -> &'static str {
    match err {
        DiscoveryError::InvalidObservation(v) => v.reason(),
        DiscoveryError::NoPeerId(_) => "no_peer_id",
        DiscoveryError::SupportedChainsUnavailable { .. } => "supported_chains_unavailable",
        _ => "other",
    }
}

#[async_trait]
impl<R, C> DiscoveryApi for DiscoveryProcessor<R, C>
where
    R: ContractReader + 'static,
    C: ChainConfigSource,
{
    fn query(&self, _prior: Option<&Outcome>) -> Query {
        Query {}
    }

    async fn observation(
        &self,
        cancel: &CancellationToken,
        _prior: Option<&Outcome>,
        _query: &Query,
    ) -> DiscoveryResult<Observation> {
        let start = Instant::now();
        let result = self.observe(cancel).instrument(self.span.clone()).await;

        let _enter = self.span.enter();
        match &result {
            Ok(obs) => {
                metrics::record_observation_produced();
                info!(
                    f_chain = obs.f_chain.len(),
                    cells = cell_count(&obs.addresses),
                    "[discovery] Observation built"
                );
            }
            Err(e) => warn!(error = %e, "[discovery] Observation failed"),
        }
        metrics::record_phase_latency("observation", start.elapsed().as_secs_f64());
        result
    }

    fn validate_observation(
        &self,
        _prior: Option<&Outcome>,
        _query: &Query,
        observation: &DiscoveryObservation,
    ) -> DiscoveryResult<()> {
        let _enter = self.span.enter();
        let start = Instant::now();

        let result = self.admit(observation);
        if let Err(e) = &result {
            metrics::record_observation_rejected(rejection_reason(e));
            warn!(
                from = %observation.oracle_id,
                error = %e,
                "[discovery] Peer observation rejected"
            );
        }
        metrics::record_phase_latency("validate_observation", start.elapsed().as_secs_f64());
        result
    }

    async fn outcome(
        &self,
        cancel: &CancellationToken,
        _prior: Option<&Outcome>,
        _query: &Query,
        observations: &[DiscoveryObservation],
    ) -> DiscoveryResult<Outcome> {
        let start = Instant::now();
        let observations: Vec<Observation> = observations
            .iter()
            .map(|ao| ao.observation.clone())
            .collect();

        let aggregated = {
            let _enter = self.span.enter();
            let aggregated = self.aggregator.aggregate(&observations)?;
            let cells = cell_count(&aggregated.addresses);
            metrics::record_agreed_cells(cells);
            info!(
                observations = observations.len(),
                f_chain = aggregated.f_chain.len(),
                cells,
                "[discovery] Contracts agreed"
            );
            aggregated
        };

        self.dispatch_sync(cancel, aggregated.addresses);
        metrics::record_phase_latency("outcome", start.elapsed().as_secs_f64());
        Ok(Outcome {})
    }
}
