//! # Domain Invariants
//!
//! Quorum arithmetic and fault tolerance rules.

use super::errors::ValidationError;
use super::observation::FChain;
use shared_types::ChainSelector;

/// Number of matching reports needed to tolerate `f` faulty nodes.
///
/// Returns `None` for a negative `f`; no value can reach consensus against it.
pub fn two_f_plus_one(f: i32) -> Option<usize> {
    usize::try_from(f).ok().map(|f| 2 * f + 1)
}

/// Invariant: every reported fault tolerance is strictly positive.
///
/// Chains are checked in ascending selector order so the reported
/// violation is deterministic.
pub fn invariant_positive_f_chain(f_chain: &FChain) -> Result<(), ValidationError> {
    let mut chains: Vec<(&ChainSelector, &i32)> = f_chain.iter().collect();
    chains.sort_unstable_by_key(|(chain, _)| **chain);

    for (chain, f) in chains {
        if *f <= 0 {
            return Err(ValidationError::NonPositiveFChain {
                chain: chain.as_u64(),
                f: *f,
            });
        }
    }
    Ok(())
}
