//! In-Memory Contract Reader Adapter
//!
//! Implements `ContractReader` over a table of deployed addresses.
//!
//! Discovery serves the deployed table filtered by the scope hint. A dependent
//! role on a remote chain is only visible when its independent role is.
//! Commits merge into a separate bound table, mirroring how a live reader
//! binds only what consensus agreed on.

use crate::config::ScopePolicy;
use crate::domain::{ContractAddresses, ContractName, ContractScope};
use crate::ports::outbound::ContractReader;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{ChainSelector, UnknownAddress};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Contract reader backed by in-memory tables.
pub struct InMemoryContractReader {
    policy: ScopePolicy,
    /// Addresses "on chain", served by discovery.
    deployed: RwLock<ContractAddresses>,
    /// Addresses bound through `sync`.
    bound: RwLock<ContractAddresses>,
    syncs: AtomicU64,
}

impl InMemoryContractReader {
    /// Create an empty reader.
    pub fn new(policy: ScopePolicy) -> Self {
        Self {
            policy,
            deployed: RwLock::new(ContractAddresses::new()),
            bound: RwLock::new(ContractAddresses::new()),
            syncs: AtomicU64::new(0),
        }
    }

    /// Create a reader with pre-deployed contracts.
    pub fn with_deployed(policy: ScopePolicy, deployed: ContractAddresses) -> Self {
        let reader = Self::new(policy);
        *reader.deployed.write() = deployed;
        reader
    }

    /// Record a deployed contract.
    pub fn deploy(&self, name: ContractName, chain: ChainSelector, address: UnknownAddress) {
        self.deployed
            .write()
            .entry(name)
            .or_default()
            .insert(chain, address);
    }

    /// Snapshot of the bound contracts.
    pub fn bound_contracts(&self) -> ContractAddresses {
        self.bound.read().clone()
    }

    /// Number of successful commits.
    pub fn sync_count(&self) -> u64 {
        self.syncs.load(Ordering::SeqCst)
    }

    fn in_scope(
        &self,
        name: ContractName,
        chain: ChainSelector,
        dest_chain: ChainSelector,
        scope: &HashSet<ChainSelector>,
    ) -> bool {
        match self.policy.scope_of(name) {
            ContractScope::Destination => scope.contains(&dest_chain),
            ContractScope::Chain => scope.contains(&chain),
        }
    }
}

impl Default for InMemoryContractReader {
    fn default() -> Self {
        Self::new(ScopePolicy::default())
    }
}

#[async_trait]
impl ContractReader for InMemoryContractReader {
    async fn discover_contracts(
        &self,
        dest_chain: ChainSelector,
        scope: &HashSet<ChainSelector>,
    ) -> Result<ContractAddresses, String> {
        let deployed = self.deployed.read();
        let mut discovered = ContractAddresses::new();

        for (name, by_chain) in deployed.iter() {
            let visible: HashMap<_, _> = by_chain
                .iter()
                .filter(|(chain, _)| self.in_scope(*name, **chain, dest_chain, scope))
                .map(|(chain, address)| (*chain, address.clone()))
                .collect();
            if !visible.is_empty() {
                discovered.insert(*name, visible);
            }
        }

        // Dependent roles are read through their independent role on remote chains
        for name in ContractName::ALL {
            let Some(depends_on) = self.policy.depends_on(name) else {
                continue;
            };
            let anchors: HashSet<ChainSelector> = discovered
                .get(&depends_on)
                .map(|by_chain| by_chain.keys().copied().collect())
                .unwrap_or_default();
            if let Some(by_chain) = discovered.get_mut(&name) {
                by_chain.retain(|chain, _| *chain == dest_chain || anchors.contains(chain));
                if by_chain.is_empty() {
                    discovered.remove(&name);
                }
            }
        }

        debug!(
            dest = %dest_chain,
            roles = discovered.len(),
            "[discovery] In-memory discovery"
        );
        Ok(discovered)
    }

    async fn sync(&self, contracts: ContractAddresses) -> Result<(), String> {
        let mut bound = self.bound.write();
        let mut cells = 0usize;
        for (name, by_chain) in contracts {
            cells += by_chain.len();
            bound.entry(name).or_default().extend(by_chain);
        }
        self.syncs.fetch_add(1, Ordering::SeqCst);
        info!(cells, "[discovery] Contracts bound");
        Ok(())
    }
}
