//! # Reader Syncer
//!
//! Single-flight, non-blocking wrapper around [`ContractReader::sync`].
//!
//! At most one commit is in flight per syncer. A call arriving while another
//! commit runs returns [`SyncStatus::AlreadySyncing`] immediately instead of
//! queueing behind it. The busy flag outlives rounds: it tracks real reader
//! I/O, not round state. Share one syncer (behind an `Arc`) between every
//! caller that writes to the same reader.

use crate::domain::{ContractAddresses, DiscoveryError, DiscoveryResult};
use crate::metrics;
use crate::ports::ContractReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of a successful [`ReaderSyncer::sync`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    /// The reader committed the contracts.
    Completed,
    /// Another commit was in flight; nothing was attempted.
    AlreadySyncing,
}

/// Releases the busy flag on every exit path, including cancellation and unwinding.
struct SyncGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Serializes commits to a shared [`ContractReader`].
pub struct ReaderSyncer<R: ContractReader + ?Sized> {
    reader: Arc<R>,
    busy: AtomicBool,
}

impl<R: ContractReader + ?Sized> ReaderSyncer<R> {
    /// Wrap a reader.
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            reader,
            busy: AtomicBool::new(false),
        }
    }

    /// Wrapped reader, for read-only discovery.
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }

    /// Whether a commit is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Commit `contracts` unless another commit is already in flight.
    pub async fn sync(
        &self,
        cancel: &CancellationToken,
        contracts: ContractAddresses,
    ) -> DiscoveryResult<SyncStatus> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("[discovery] Commit already in flight, skipping");
            metrics::record_sync_result("already_syncing");
            return Ok(SyncStatus::AlreadySyncing);
        }
        let _guard = SyncGuard { busy: &self.busy };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DiscoveryError::Cancelled),
            res = self.reader.sync(contracts) => res
                .map(|()| SyncStatus::Completed)
                .map_err(DiscoveryError::SyncFailed),
        };

        match &result {
            Ok(_) => metrics::record_sync_result("completed"),
            Err(e) => {
                warn!(error = %e, "[discovery] Contract commit did not complete");
                metrics::record_sync_result("failed");
            }
        }
        result
    }
}
