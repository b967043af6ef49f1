//! # Simulated Oracle Network
//!
//! Wires one [`DiscoveryProcessor`] per oracle over a shared home-chain view
//! and per-node in-memory readers, then drives rounds the way the consensus
//! runtime would: observe on every node, broadcast, admit, aggregate.

use contract_discovery::{
    ChainConfig, ContractAddresses, ContractName, DiscoveryApi, DiscoveryConfig,
    DiscoveryDependencies, DiscoveryObservation, DiscoveryProcessor, InMemoryContractReader,
    Query, ReaderSyncer, ScopePolicy, StaticChainConfigSource,
};
use shared_types::{ChainSelector, OracleId, PeerId, UnknownAddress};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Install a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic peer identity of an oracle.
pub fn peer_id(oracle: u8) -> PeerId {
    PeerId([oracle; 32])
}

/// One simulated oracle.
pub struct SimNode {
    /// Oracle identity
    pub oracle_id: OracleId,
    /// Local reader, absent on nodes without discovery capability
    pub reader: Option<Arc<InMemoryContractReader>>,
    /// Processor under test
    pub processor: DiscoveryProcessor<InMemoryContractReader, StaticChainConfigSource>,
}

/// Builder for [`SimNetwork`].
pub struct NetworkBuilder {
    nodes: u8,
    dest_chain: ChainSelector,
    f_role_don: usize,
    configs: HashMap<ChainSelector, ChainConfig>,
    deployed: ContractAddresses,
    overrides: HashMap<u8, Vec<(ContractName, ChainSelector, UnknownAddress)>>,
    readerless: HashSet<u8>,
}

impl NetworkBuilder {
    /// Start a network of `nodes` oracles serving `dest_chain`.
    pub fn new(nodes: u8, dest_chain: ChainSelector, f_role_don: usize) -> Self {
        Self {
            nodes,
            dest_chain,
            f_role_don,
            configs: HashMap::new(),
            deployed: ContractAddresses::new(),
            overrides: HashMap::new(),
            readerless: HashSet::new(),
        }
    }

    /// Register a chain with its fault tolerance and supporting oracles.
    pub fn chain(mut self, chain: ChainSelector, f: i32, supporting: &[u8]) -> Self {
        self.configs.insert(
            chain,
            ChainConfig::new(f, supporting.iter().map(|o| peer_id(*o))),
        );
        self
    }

    /// Register a chain supported by every oracle.
    pub fn chain_for_all(self, chain: ChainSelector, f: i32) -> Self {
        let all: Vec<u8> = (0..self.nodes).collect();
        self.chain(chain, f, &all)
    }

    /// Deploy a contract visible to every reader.
    pub fn deploy(mut self, name: ContractName, chain: ChainSelector, address: &str) -> Self {
        self.deployed
            .entry(name)
            .or_default()
            .insert(chain, UnknownAddress::from(address));
        self
    }

    /// Make one oracle's reader see a different address.
    pub fn deploy_on(
        mut self,
        oracle: u8,
        name: ContractName,
        chain: ChainSelector,
        address: &str,
    ) -> Self {
        self.overrides
            .entry(oracle)
            .or_default()
            .push((name, chain, UnknownAddress::from(address)));
        self
    }

    /// Run an oracle without a contract reader.
    pub fn without_reader(mut self, oracle: u8) -> Self {
        self.readerless.insert(oracle);
        self
    }

    /// Build the network.
    pub fn build(self) -> SimNetwork {
        let chain_config = Arc::new(StaticChainConfigSource::new(self.configs));
        let oracle_peers: HashMap<OracleId, PeerId> = (0..self.nodes)
            .map(|i| (OracleId(i), peer_id(i)))
            .collect();

        let nodes = (0..self.nodes)
            .map(|i| {
                let reader = (!self.readerless.contains(&i)).then(|| {
                    let reader = InMemoryContractReader::with_deployed(
                        ScopePolicy::default(),
                        self.deployed.clone(),
                    );
                    for (name, chain, address) in self.overrides.get(&i).into_iter().flatten() {
                        reader.deploy(*name, *chain, address.clone());
                    }
                    Arc::new(reader)
                });

                let processor = DiscoveryProcessor::new(DiscoveryDependencies {
                    syncer: reader.clone().map(|r| Arc::new(ReaderSyncer::new(r))),
                    chain_config: chain_config.clone(),
                    oracle_peers: oracle_peers.clone(),
                    oracle_id: OracleId(i),
                    config: DiscoveryConfig::new(self.dest_chain, self.f_role_don),
                })
                .expect("valid discovery config");

                SimNode {
                    oracle_id: OracleId(i),
                    reader,
                    processor,
                }
            })
            .collect();

        SimNetwork {
            nodes,
            chain_config,
        }
    }
}

/// A simulated oracle network.
pub struct SimNetwork {
    /// Oracles, indexed by oracle id
    pub nodes: Vec<SimNode>,
    /// Home-chain view shared by every oracle
    pub chain_config: Arc<StaticChainConfigSource>,
}

impl SimNetwork {
    /// Observation phase: every node that can observe does.
    pub async fn observe_all(&self) -> Vec<DiscoveryObservation> {
        let cancel = CancellationToken::new();
        let mut observations = Vec::new();
        for node in &self.nodes {
            match node.processor.observation(&cancel, None, &Query {}).await {
                Ok(obs) => observations.push(DiscoveryObservation::new(node.oracle_id, obs)),
                Err(e) => warn!(oracle = %node.oracle_id, error = %e, "observation failed"),
            }
        }
        observations
    }

    /// Observations node `idx` admits.
    pub fn admitted_by(
        &self,
        idx: usize,
        observations: &[DiscoveryObservation],
    ) -> Vec<DiscoveryObservation> {
        let node = &self.nodes[idx];
        observations
            .iter()
            .filter(|ao| {
                node.processor
                    .validate_observation(None, &Query {}, ao)
                    .is_ok()
            })
            .cloned()
            .collect()
    }

    /// Outcome phase on every node over what it admitted.
    pub async fn outcome_all(&self, observations: &[DiscoveryObservation]) {
        let cancel = CancellationToken::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            let admitted = self.admitted_by(idx, observations);
            if let Err(e) = node
                .processor
                .outcome(&cancel, None, &Query {}, &admitted)
                .await
            {
                warn!(oracle = %node.oracle_id, error = %e, "outcome failed");
            }
        }
    }

    /// One full round.
    pub async fn run_round(&self) -> Vec<DiscoveryObservation> {
        let observations = self.observe_all().await;
        self.outcome_all(&observations).await;
        observations
    }

    /// Wait until node `idx` committed at least `commits` times.
    pub async fn wait_for_commits(&self, idx: usize, commits: u64) -> ContractAddresses {
        let reader = self.nodes[idx]
            .reader
            .as_ref()
            .expect("node has a reader");

        tokio::time::timeout(Duration::from_secs(5), async {
            while reader.sync_count() < commits {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("commit did not land in time");

        reader.bound_contracts()
    }
}
