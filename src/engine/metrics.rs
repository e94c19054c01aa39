//! Engine run metrics.
//!
//! `Anonymizer::anonymize` returns only the [`EngineResult`];
//! `Anonymizer::run_with_metrics` additionally reports stage timings and the
//! spans that lost a conflict. Collecting them costs a few `Instant::now()`
//! calls and one clone per dropped span.

use crate::{DetectedSpan, EngineResult};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time, validation included.
    pub total: Duration,
    /// Time spent in conflict resolution.
    pub resolve: Duration,
    /// Time spent dispatching operators and splicing.
    pub splice: Duration,
}

/// Engine output bundled with run details.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub result: EngineResult,
    /// Spans discarded by conflict resolution, in input order.
    pub dropped: Vec<DetectedSpan>,
    pub metrics: RunMetrics,
}
