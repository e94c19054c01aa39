//! The anonymization pipeline.
//!
//! ```text
//! text + spans ──▶ validate_spans ──▶ conflict::resolve ──▶ kept (asc by start)
//!                                                             │ reversed
//!                                                             ▼
//!                          dispatch::resolve_operator + prepare (per span)
//!                                                             │
//!                                                             ▼
//!                               TextSplicer::splice (right to left)
//!                                                             │
//!                                                             ▼
//!                                  TextSplicer::finish ──▶ EngineResult
//! ```
//!
//! Any error aborts the run before a result is assembled; the splice buffer is
//! dropped with it.

use super::conflict;
use super::dispatch;
use super::metrics::{RunMetrics, RunResult};
use super::splicer::TextSplicer;
use crate::{AnonymizeError, DetectedSpan, EngineResult, OperatorConfigs, OperatorRegistry, Options, SpanFault};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

/// Runs anonymization against an operator registry.
///
/// The registry is only read, so one `Anonymizer` can serve many threads.
///
/// ```
/// use redacta::{Anonymizer, DetectedSpan, FnOperator, OperatorConfig, OperatorConfigs, OperatorRegistry, Options};
///
/// let registry = OperatorRegistry::builtin()
///     .with_operator(FnOperator::new("initials", |text, _| {
///         text.split_whitespace().filter_map(|w| w.chars().next()).collect()
///     }));
/// let anonymizer = Anonymizer::new(&registry);
///
/// let mut configs = OperatorConfigs::new();
/// configs.insert("PERSON".to_string(), OperatorConfig::new("initials"));
///
/// let spans = [DetectedSpan::new("PERSON", 0, 10, 0.9)];
/// let out = anonymizer.anonymize("John Smith called", &spans, Some(&configs), &Options::default()).unwrap();
/// assert_eq!(out.text, "JS called");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Anonymizer<'r> {
    registry: &'r OperatorRegistry,
}

impl<'r> Anonymizer<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r OperatorRegistry {
        self.registry
    }

    /// Names of the operators this anonymizer can dispatch to.
    pub fn available_operators(&self) -> BTreeSet<String> {
        self.registry.names()
    }

    /// Anonymize `text`, returning the transformed text and applied items.
    ///
    /// `configs` maps entity types (or `"DEFAULT"`) to operators; `None`
    /// behaves like an empty map.
    pub fn anonymize(
        &self,
        text: &str,
        spans: &[DetectedSpan],
        configs: Option<&OperatorConfigs>,
        options: &Options,
    ) -> Result<EngineResult, AnonymizeError> {
        self.run_with_metrics(text, spans, configs, options).map(|run| run.result)
    }

    /// Like [`Anonymizer::anonymize`], with timings and dropped spans.
    pub fn run_with_metrics(
        &self,
        text: &str,
        spans: &[DetectedSpan],
        configs: Option<&OperatorConfigs>,
        options: &Options,
    ) -> Result<RunResult, AnonymizeError> {
        let total_start = Instant::now();
        validate_spans(text, spans)?;

        let resolve_start = Instant::now();
        let resolution = conflict::resolve(spans, options.conflict_policy);
        let resolve = resolve_start.elapsed();
        debug!(
            spans = spans.len(),
            kept = resolution.kept.len(),
            dropped = resolution.dropped.len(),
            policy = ?options.conflict_policy,
            "resolved span conflicts"
        );

        let splice_start = Instant::now();
        let mut splicer = TextSplicer::new(text);
        for span in resolution.kept.iter().rev() {
            let config = dispatch::resolve_operator(&span.entity_type, configs);
            let prepared = dispatch::prepare(self.registry, &span.entity_type, config)?;
            // Log positions and names only; the text itself is what we're hiding.
            debug!(
                entity_type = %span.entity_type,
                start = span.start,
                end = span.end,
                operator = prepared.name(),
                "anonymizing span"
            );
            let anonymized = prepared.apply(splicer.text_at(span.start, span.end))?;
            splicer.splice(span.start, span.end, anonymized, config.operator_name.as_str(), span.entity_type.as_str());
        }
        let applied = splicer.len();
        let (text, items) = splicer.finish();
        let splice = splice_start.elapsed();

        let total = total_start.elapsed();
        debug!(applied, ?total, "anonymization complete");

        Ok(RunResult {
            result: EngineResult { text, items },
            dropped: resolution.dropped.into_iter().cloned().collect(),
            metrics: RunMetrics { total, resolve, splice },
        })
    }
}

/// Reject spans that are empty, reversed, out of bounds, split a UTF-8
/// character, or carry a NaN score. Every span is checked, including ones
/// conflict resolution would later drop.
fn validate_spans(text: &str, spans: &[DetectedSpan]) -> Result<(), AnonymizeError> {
    for span in spans {
        let fault = if span.start >= span.end {
            Some(SpanFault::EmptyOrReversed)
        } else if span.end > text.len() {
            Some(SpanFault::OutOfBounds { len: text.len() })
        } else if !text.is_char_boundary(span.start) {
            Some(SpanFault::NotCharBoundary { offset: span.start })
        } else if !text.is_char_boundary(span.end) {
            Some(SpanFault::NotCharBoundary { offset: span.end })
        } else if span.score.is_nan() {
            Some(SpanFault::InvalidScore)
        } else {
            None
        };

        if let Some(reason) = fault {
            return Err(AnonymizeError::InvalidSpan {
                entity_type: span.entity_type.clone(),
                start: span.start,
                end: span.end,
                reason,
            });
        }
    }
    Ok(())
}
