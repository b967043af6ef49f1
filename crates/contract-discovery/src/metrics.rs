//! # Discovery Metrics
//!
//! Prometheus metrics for monitoring discovery rounds.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! contract-discovery = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `discovery_observations_total` - Counter of observations produced by this node
//! - `discovery_observations_rejected_total` - Counter of rejected peer observations (by reason)
//! - `discovery_agreed_cells` - Histogram of agreed address cells per outcome
//! - `discovery_sync_total` - Counter of commit attempts (by result)
//! - `discovery_phase_latency_seconds` - Histogram of lifecycle latency (by phase)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_histogram, register_histogram_vec, register_int_counter,
    CounterVec, Histogram, HistogramVec, IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total observations produced
    pub static ref OBSERVATIONS_PRODUCED: IntCounter = register_int_counter!(
        "discovery_observations_total",
        "Total number of observations produced by this node"
    )
    .expect("Failed to create OBSERVATIONS_PRODUCED metric");

    /// Total peer observations rejected, labeled by reason
    pub static ref OBSERVATIONS_REJECTED: CounterVec = register_counter_vec!(
        "discovery_observations_rejected_total",
        "Total number of peer observations rejected",
        &["reason"]
    )
    .expect("Failed to create OBSERVATIONS_REJECTED metric");

    /// Agreed cells per outcome
    pub static ref AGREED_CELLS: Histogram = register_histogram!(
        "discovery_agreed_cells",
        "Number of agreed contract address cells per outcome",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]
    )
    .expect("Failed to create AGREED_CELLS metric");

    /// Commit attempts, labeled by result
    pub static ref SYNC_RESULTS: CounterVec = register_counter_vec!(
        "discovery_sync_total",
        "Total number of contract commit attempts",
        &["result"]
    )
    .expect("Failed to create SYNC_RESULTS metric");

    /// Lifecycle latency, labeled by phase
    pub static ref PHASE_LATENCY: HistogramVec = register_histogram_vec!(
        "discovery_phase_latency_seconds",
        "Time spent in a lifecycle phase in seconds",
        &["phase"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 30.0]
    )
    .expect("Failed to create PHASE_LATENCY metric");
}

/// Record an observation produced by this node
#[cfg(feature = "metrics")]
pub fn record_observation_produced() {
    OBSERVATIONS_PRODUCED.inc();
}

/// Record a rejected peer observation with reason
#[cfg(feature = "metrics")]
pub fn record_observation_rejected(reason: &str) {
    OBSERVATIONS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record the number of agreed cells of an outcome
#[cfg(feature = "metrics")]
pub fn record_agreed_cells(cells: usize) {
    AGREED_CELLS.observe(cells as f64);
}

/// Record a commit result
#[cfg(feature = "metrics")]
pub fn record_sync_result(result: &str) {
    SYNC_RESULTS.with_label_values(&[result]).inc();
}

/// Record lifecycle phase latency
#[cfg(feature = "metrics")]
pub fn record_phase_latency(phase: &str, seconds: f64) {
    PHASE_LATENCY.with_label_values(&[phase]).observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_observation_produced() {}

#[cfg(not(feature = "metrics"))]
pub fn record_observation_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_agreed_cells(_cells: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_sync_result(_result: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_phase_latency(_phase: &str, _seconds: f64) {}
