use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`crate::Etherman`] client.
#[derive(Metrics)]
#[metrics(scope = "etherman")]
pub struct EthermanMetrics {
    /// A counter on the rollup events processed.
    pub events_processed: Counter,
    /// A counter on the administrative events dropped.
    pub events_ignored: Counter,
    /// A counter on the unregistered topics skipped.
    pub unknown_events: Counter,
    /// A counter on the blocks retrieved by hash.
    pub blocks_retrieved: Counter,
    /// A counter on the block requests retried after rate limiting.
    pub rate_limit_retries: Counter,
    /// A histogram of block-range read durations, in seconds.
    pub read_duration: Histogram,
}
