//! # Quorum Aggregation
//!
//! Nested two-phase consensus over a round's observations:
//!
//! ```text
//! observations ──agree_f_chain (2*f_role_don+1)──→ agreed fChain
//!      │                                               │
//!      └──────agree_addresses (2*f(chain)+1) ←─────────┘
//! ```
//!
//! The fault tolerance of a chain is itself subject to consensus before it is
//! used as the threshold for that chain's addresses. Each phase is a separate
//! pass over the observation list.

use crate::config::ScopePolicy;
use crate::domain::{
    empty_contract_addresses, two_f_plus_one, ContractAddresses, ContractName, ContractScope,
    DiscoveryError, DiscoveryResult, FChain, Observation,
};
use shared_types::{ChainSelector, UnknownAddress};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Agreed view of one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregatedObservation {
    /// Chains whose fault tolerance reached `2*f_role_don+1`.
    pub f_chain: FChain,
    /// Every role, holding only the cells that reached quorum.
    pub addresses: ContractAddresses,
}

/// Value reported by a quorum of `threshold` identical reports.
///
/// The most frequent value wins only if no other value ties it and its
/// count reaches the threshold.
pub fn consensus_value<V>(values: &[V], threshold: usize) -> Option<V>
where
    V: Eq + Hash + Clone,
{
    let mut counts: HashMap<&V, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let top = counts.values().copied().max()?;
    if top < threshold {
        return None;
    }

    let mut leaders = counts.iter().filter(|(_, count)| **count == top);
    let (winner, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some((*winner).clone())
}

/// Computes majority-agreed values from per-node observations.
#[derive(Clone, Debug)]
pub struct QuorumAggregator {
    dest_chain: ChainSelector,
    f_role_don: usize,
    policy: ScopePolicy,
}

impl QuorumAggregator {
    /// Create an aggregator for a destination chain.
    pub fn new(dest_chain: ChainSelector, f_role_don: usize, policy: ScopePolicy) -> Self {
        Self {
            dest_chain,
            f_role_don,
            policy,
        }
    }

    /// Reports needed for fChain consensus.
    ///
    /// Saturates, so an unreachable `f_role_don` yields no consensus rather
    /// than an overflow.
    pub fn f_chain_threshold(&self) -> usize {
        self.f_role_don.saturating_mul(2).saturating_add(1)
    }

    /// Phase 1: agree on the fault tolerance of every reported chain.
    pub fn agree_f_chain(&self, observations: &[Observation]) -> FChain {
        let mut reports: HashMap<ChainSelector, Vec<i32>> = HashMap::new();
        for obs in observations {
            for (chain, f) in &obs.f_chain {
                reports.entry(*chain).or_default().push(*f);
            }
        }

        let threshold = self.f_chain_threshold();
        let mut agreed = FChain::new();
        for (chain, values) in reports {
            match consensus_value(&values, threshold) {
                Some(f) => {
                    agreed.insert(chain, f);
                }
                None => debug!(
                    "[discovery] No fChain consensus for {}: {} reports, need {}",
                    chain,
                    values.len(),
                    threshold
                ),
            }
        }
        agreed
    }

    /// Phase 2: agree on addresses, thresholded by the agreed fChain.
    ///
    /// Every role is present in the result; cells without quorum are omitted.
    pub fn agree_addresses(
        &self,
        observations: &[Observation],
        agreed_f_chain: &FChain,
    ) -> ContractAddresses {
        let mut agreed = empty_contract_addresses();

        for name in ContractName::ALL {
            let mut reports: HashMap<ChainSelector, Vec<UnknownAddress>> = HashMap::new();
            for obs in observations {
                if let Some(by_chain) = obs.addresses.get(&name) {
                    for (chain, addr) in by_chain {
                        reports.entry(*chain).or_default().push(addr.clone());
                    }
                }
            }

            let cells = agreed.entry(name).or_default();
            for (chain, values) in reports {
                let Some(threshold) = self.address_threshold(name, chain, agreed_f_chain) else {
                    debug!(
                        "[discovery] No agreed fChain to threshold {} on {}",
                        name, chain
                    );
                    continue;
                };
                match consensus_value(&values, threshold) {
                    Some(addr) => {
                        cells.insert(chain, addr);
                    }
                    None => debug!(
                        "[discovery] No consensus on {} for {}: {} reports, need {}",
                        name,
                        chain,
                        values.len(),
                        threshold
                    ),
                }
            }
        }
        agreed
    }

    /// Run both phases.
    ///
    /// Fails only when there is nothing to aggregate.
    pub fn aggregate(
        &self,
        observations: &[Observation],
    ) -> DiscoveryResult<AggregatedObservation> {
        if observations.is_empty() {
            return Err(DiscoveryError::NoObservations);
        }

        let f_chain = self.agree_f_chain(observations);
        let addresses = self.agree_addresses(observations, &f_chain);
        Ok(AggregatedObservation { f_chain, addresses })
    }

    fn address_threshold(
        &self,
        name: ContractName,
        chain: ChainSelector,
        agreed_f_chain: &FChain,
    ) -> Option<usize> {
        let threshold_chain = match self.policy.scope_of(name) {
            ContractScope::Destination => self.dest_chain,
            ContractScope::Chain => chain,
        };
        agreed_f_chain
            .get(&threshold_chain)
            .copied()
            .and_then(two_f_plus_one)
    }
}
