//! # Discovery Configuration
//!
//! Processor parameters supplied by the host at construction.

use crate::domain::{ContractName, ContractScope};
use serde::{Deserialize, Serialize};
use shared_types::ChainSelector;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Default upper bound for one contract commit.
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 30;

/// Largest `f_role_don` a DON of at most 256 oracles can tolerate (`n >= 3f + 1`).
pub const MAX_F_ROLE_DON: usize = 85;

fn default_sync_timeout_secs() -> u64 {
    DEFAULT_SYNC_TIMEOUT_SECS
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero timeout would cancel every commit.
    #[error("sync timeout must be greater than zero")]
    ZeroSyncTimeout,

    /// No DON addressable by oracle ids can tolerate this many faults.
    #[error("f_role_don {0} exceeds the maximum of {}", MAX_F_ROLE_DON)]
    FRoleDonTooLarge(usize),

    /// A role cannot depend on itself.
    #[error("contract {0} cannot depend on itself")]
    SelfDependency(ContractName),
}

/// Per-role observation scope and coupling rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePolicy {
    /// Scope per role; roles not listed are chain-scoped.
    pub scopes: HashMap<ContractName, ContractScope>,
    /// Dependent role -> role it is derived from.
    pub dependencies: HashMap<ContractName, ContractName>,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            scopes: HashMap::from([
                (ContractName::OnRamp, ContractScope::Destination),
                (ContractName::NonceManager, ContractScope::Chain),
                (ContractName::FeeQuoter, ContractScope::Chain),
                (ContractName::RMNRemote, ContractScope::Chain),
                (ContractName::Router, ContractScope::Chain),
            ]),
            dependencies: HashMap::from([(ContractName::FeeQuoter, ContractName::OnRamp)]),
        }
    }
}

impl ScopePolicy {
    /// Scope a role is observed in.
    pub fn scope_of(&self, name: ContractName) -> ContractScope {
        self.scopes.get(&name).copied().unwrap_or_default()
    }

    /// Role that must be co-present with `name`, if any.
    pub fn depends_on(&self, name: ContractName) -> Option<ContractName> {
        self.dependencies.get(&name).copied()
    }

    /// Override the scope of a role.
    pub fn with_scope(mut self, name: ContractName, scope: ContractScope) -> Self {
        self.scopes.insert(name, scope);
        self
    }

    /// Require `depends_on` to be co-present with `name`.
    pub fn with_dependency(mut self, name: ContractName, depends_on: ContractName) -> Self {
        self.dependencies.insert(name, depends_on);
        self
    }

    /// Drop the coupling rule of a role.
    pub fn without_dependency(mut self, name: ContractName) -> Self {
        self.dependencies.remove(&name);
        self
    }

    /// Validate the policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (dependent, independent) in &self.dependencies {
            if dependent == independent {
                return Err(ConfigError::SelfDependency(*dependent));
            }
        }
        Ok(())
    }
}

/// Discovery processor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Chain this processor instance serves.
    pub dest_chain: ChainSelector,
    /// DON-wide fault tolerance; fChain consensus needs `2 * f_role_don + 1` reports.
    pub f_role_don: usize,
    /// Upper bound for one asynchronous contract commit.
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,
    /// Role scoping and coupling.
    #[serde(default)]
    pub scope_policy: ScopePolicy,
}

impl DiscoveryConfig {
    /// Create a configuration with default timeout and policy.
    pub fn new(dest_chain: ChainSelector, f_role_don: usize) -> Self {
        Self {
            dest_chain,
            f_role_don,
            sync_timeout_secs: DEFAULT_SYNC_TIMEOUT_SECS,
            scope_policy: ScopePolicy::default(),
        }
    }

    /// Override the commit timeout.
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout_secs = timeout.as_secs();
        self
    }

    /// Override the scope policy.
    pub fn with_scope_policy(mut self, scope_policy: ScopePolicy) -> Self {
        self.scope_policy = scope_policy;
        self
    }

    /// Commit timeout as a `Duration`.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_timeout_secs == 0 {
            return Err(ConfigError::ZeroSyncTimeout);
        }
        if self.f_role_don > MAX_F_ROLE_DON {
            return Err(ConfigError::FRoleDonTooLarge(self.f_role_don));
        }
        self.scope_policy.validate()
    }
}
