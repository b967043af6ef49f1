//! # Observation Validation
//!
//! Admission checks for untrusted peer observations.
//!
//! ## Checks (first failure wins)
//!
//! | Order | Rule |
//! |-------|------|
//! | 1 | Every fChain value is strictly positive |
//! | 2 | Every address is within the submitter's authorized scope for its role |
//! | 3 | Dependent roles on remote chains come with their independent role |
//! | 4 | Every fChain chain is authorized for the submitter |
//!
//! The observation is accepted or rejected as a whole.

use crate::config::ScopePolicy;
use crate::domain::{
    invariant_positive_f_chain, ContractName, ContractScope, DiscoveryObservation, Observation,
    ValidationError,
};
use shared_types::{ChainSelector, OracleId, UnknownAddress};
use std::collections::{HashMap, HashSet};

/// Stateless validator for attributed observations.
#[derive(Clone, Debug)]
pub struct ObservationValidator {
    dest_chain: ChainSelector,
    policy: ScopePolicy,
}

impl ObservationValidator {
    /// Create a validator for a destination chain.
    pub fn new(dest_chain: ChainSelector, policy: ScopePolicy) -> Self {
        Self { dest_chain, policy }
    }

    /// Validate an observation against the submitter's authorized chains.
    pub fn validate(
        &self,
        ao: &DiscoveryObservation,
        supported_chains: &HashSet<ChainSelector>,
    ) -> Result<(), ValidationError> {
        let oracle = ao.oracle_id;
        let obs = &ao.observation;

        invariant_positive_f_chain(&obs.f_chain)?;
        self.validate_scopes(oracle, obs, supported_chains)?;
        self.validate_dependencies(oracle, obs)?;
        self.validate_f_chain_scope(oracle, obs, supported_chains)
    }

    fn validate_scopes(
        &self,
        oracle: OracleId,
        obs: &Observation,
        supported_chains: &HashSet<ChainSelector>,
    ) -> Result<(), ValidationError> {
        for contract in ContractName::ALL {
            let Some(by_chain) = obs.addresses.get(&contract) else {
                continue;
            };
            if by_chain.is_empty() {
                continue;
            }

            match self.policy.scope_of(contract) {
                ContractScope::Destination => {
                    if !supported_chains.contains(&self.dest_chain) {
                        return Err(ValidationError::DestinationNotAllowed {
                            oracle,
                            contract,
                            dest: self.dest_chain,
                        });
                    }
                }
                ContractScope::Chain => {
                    for chain in sorted_chains(by_chain) {
                        if !supported_chains.contains(&chain) {
                            return Err(ValidationError::ChainNotAllowed {
                                oracle,
                                contract,
                                chain,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_dependencies(
        &self,
        oracle: OracleId,
        obs: &Observation,
    ) -> Result<(), ValidationError> {
        for contract in ContractName::ALL {
            let Some(depends_on) = self.policy.depends_on(contract) else {
                continue;
            };
            let Some(by_chain) = obs.addresses.get(&contract) else {
                continue;
            };

            // The destination reads its own registry directly
            for chain in sorted_chains(by_chain) {
                if chain == self.dest_chain {
                    continue;
                }
                if obs.address(depends_on, chain).is_none() {
                    return Err(ValidationError::MissingDependency {
                        oracle,
                        contract,
                        depends_on,
                        chain,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_f_chain_scope(
        &self,
        oracle: OracleId,
        obs: &Observation,
        supported_chains: &HashSet<ChainSelector>,
    ) -> Result<(), ValidationError> {
        let mut chains: Vec<ChainSelector> = obs.f_chain.keys().copied().collect();
        chains.sort_unstable();

        match chains.into_iter().find(|c| !supported_chains.contains(c)) {
            Some(chain) => Err(ValidationError::FChainNotAllowed { oracle, chain }),
            None => Ok(()),
        }
    }
}

fn sorted_chains(by_chain: &HashMap<ChainSelector, UnknownAddress>) -> Vec<ChainSelector> {
    let mut chains: Vec<ChainSelector> = by_chain.keys().copied().collect();
    chains.sort_unstable();
    chains
}
