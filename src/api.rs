use crate::engine::Anonymizer;
use crate::{AnonymizeError, ConflictPolicy, DetectedSpan, EngineResult, OperatorConfigs, OperatorRegistry};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::time::Duration;

static DEFAULT_REGISTRY: Lazy<OperatorRegistry> = Lazy::new(OperatorRegistry::builtin);

/// Options that affect resolution behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// How overlapping detections are settled.
    pub conflict_policy: ConflictPolicy,
}

/// Additional details returned by [`anonymize_verbose_with`].
#[derive(Debug, Clone)]
pub struct AnonymizeDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent resolving span conflicts.
    pub resolve: Duration,
    /// Time spent running operators and splicing.
    pub splice: Duration,
    /// Spans that survived conflict resolution.
    pub kept: usize,
    /// Spans that lost a conflict, in input order.
    pub dropped: Vec<DetectedSpan>,
}

/// Result from [`anonymize_verbose_with`].
#[derive(Debug, Clone)]
pub struct AnonymizeResultVerbose {
    pub result: EngineResult,
    pub details: AnonymizeDetails,
}

/// The process-wide registry of built-in operators.
///
/// Built on first use and never modified afterwards.
pub fn default_registry() -> &'static OperatorRegistry {
    &DEFAULT_REGISTRY
}

/// Anonymize `text` with the built-in operators and default [`Options`].
///
/// # Example
/// ```
/// use redacta::{DetectedSpan, anonymize};
///
/// let spans = [DetectedSpan::new("PERSON", 0, 4, 0.9)];
/// let out = anonymize("John lives in NY", &spans, None).unwrap();
/// assert_eq!(out.text, "<PERSON> lives in NY");
/// assert_eq!((out.items[0].start, out.items[0].end), (0, 8));
/// ```
pub fn anonymize(
    text: &str,
    spans: &[DetectedSpan],
    configs: Option<&OperatorConfigs>,
) -> Result<EngineResult, AnonymizeError> {
    anonymize_with(text, spans, configs, &Options::default())
}

/// Anonymize `text` with the built-in operators and the provided `options`.
pub fn anonymize_with(
    text: &str,
    spans: &[DetectedSpan],
    configs: Option<&OperatorConfigs>,
    options: &Options,
) -> Result<EngineResult, AnonymizeError> {
    Anonymizer::new(&DEFAULT_REGISTRY).anonymize(text, spans, configs, options)
}

/// Anonymize `text` and return timings plus the spans dropped by conflict
/// resolution.
pub fn anonymize_verbose_with(
    text: &str,
    spans: &[DetectedSpan],
    configs: Option<&OperatorConfigs>,
    options: &Options,
) -> Result<AnonymizeResultVerbose, AnonymizeError> {
    let run = Anonymizer::new(&DEFAULT_REGISTRY).run_with_metrics(text, spans, configs, options)?;
    let details = AnonymizeDetails {
        total: run.metrics.total,
        resolve: run.metrics.resolve,
        splice: run.metrics.splice,
        kept: run.result.items.len(),
        dropped: run.dropped,
    };
    Ok(AnonymizeResultVerbose { result: run.result, details })
}

/// Names of the operators registered in the default registry.
pub fn list_available_operators() -> BTreeSet<String> {
    DEFAULT_REGISTRY.names()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_ENTITY_KEY, OperatorConfig, OutputEntity, ParamError, SpanFault};

    const TEXT: &str = "John lives in NY";

    fn span(entity_type: &str, start: usize, end: usize, score: f64) -> DetectedSpan {
        DetectedSpan::new(entity_type, start, end, score)
    }

    fn item(operator: &str, entity_type: &str, start: usize, end: usize, text: &str) -> OutputEntity {
        OutputEntity {
            operator: operator.to_string(),
            entity_type: entity_type.to_string(),
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn single_span_uses_replace_by_default() {
        let out = anonymize(TEXT, &[span("PERSON", 0, 4, 0.9)], Some(&OperatorConfigs::new())).unwrap();
        assert_eq!(out.text, "<PERSON> lives in NY");
        assert_eq!(out.items, vec![item("replace", "PERSON", 0, 8, "<PERSON>")]);
    }

    #[test]
    fn equal_ranges_produce_one_substitution() {
        let spans = [span("PERSON", 0, 4, 0.9), span("NAME", 0, 4, 0.5)];
        let out = anonymize(TEXT, &spans, None).unwrap();
        assert_eq!(out.text, "<PERSON> lives in NY");
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].entity_type, "PERSON");
        assert_eq!(out.items[0].start, 0);
    }

    #[test]
    fn multiple_spans_shift_offsets() {
        let spans = [span("PERSON", 0, 4, 0.9), span("LOCATION", 14, 16, 0.8)];
        let out = anonymize(TEXT, &spans, None).unwrap();
        assert_eq!(out.text, "<PERSON> lives in <LOCATION>");
        assert_eq!(
            out.items,
            vec![item("replace", "PERSON", 0, 8, "<PERSON>"), item("replace", "LOCATION", 18, 28, "<LOCATION>")]
        );
        for it in &out.items {
            assert_eq!(out.slice(it), Some(it.text.as_str()));
        }
    }

    #[test]
    fn reversed_span_is_rejected() {
        let err = anonymize(TEXT, &[span("PERSON", 10, 5, 0.9)], None).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::InvalidSpan {
                entity_type: "PERSON".to_string(),
                start: 10,
                end: 5,
                reason: SpanFault::EmptyOrReversed,
            }
        );
        assert!(err.to_string().contains("PERSON"));
    }

    #[test]
    fn per_entity_and_default_configs() {
        let mut configs = OperatorConfigs::new();
        configs.insert(
            "PERSON".to_string(),
            OperatorConfig::new("mask")
                .with_param("masking_char", "*")
                .with_param("chars_to_mask", 2)
                .with_param("from_end", true),
        );
        configs.insert(DEFAULT_ENTITY_KEY.to_string(), OperatorConfig::new("redact"));

        let spans = [span("PERSON", 0, 4, 0.9), span("LOCATION", 14, 16, 0.8)];
        let out = anonymize(TEXT, &spans, Some(&configs)).unwrap();
        assert_eq!(out.text, "Jo** lives in ");
        assert_eq!(out.items, vec![item("mask", "PERSON", 0, 4, "Jo**"), item("redact", "LOCATION", 14, 14, "")]);
    }

    #[test]
    fn replace_new_value_is_used() {
        let mut configs = OperatorConfigs::new();
        configs.insert("LOCATION".to_string(), OperatorConfig::new("replace").with_param("new_value", "somewhere"));
        let out = anonymize(TEXT, &[span("LOCATION", 14, 16, 0.8)], Some(&configs)).unwrap();
        assert_eq!(out.text, "John lives in somewhere");
        assert_eq!(out.items, vec![item("replace", "LOCATION", 14, 23, "somewhere")]);
    }

    #[test]
    fn unknown_operator_fails_the_call() {
        let mut configs = OperatorConfigs::new();
        configs.insert("PERSON".to_string(), OperatorConfig::new("scramble"));
        let err = anonymize(TEXT, &[span("PERSON", 0, 4, 0.9)], Some(&configs)).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::UnknownOperator { operator: "scramble".to_string(), entity_type: "PERSON".to_string() }
        );
    }

    #[test]
    fn invalid_parameters_fail_the_call() {
        let mut configs = OperatorConfigs::new();
        configs.insert(DEFAULT_ENTITY_KEY.to_string(), OperatorConfig::new("mask").with_param("masking_char", "*"));
        let err = anonymize(TEXT, &[span("PERSON", 0, 4, 0.9)], Some(&configs)).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::InvalidParameter {
                operator: "mask".to_string(),
                entity_type: "PERSON".to_string(),
                reason: ParamError::Missing("chars_to_mask".to_string()),
            }
        );
    }

    #[test]
    fn no_spans_returns_text_unchanged() {
        let out = anonymize(TEXT, &[], None).unwrap();
        assert_eq!(out, EngineResult { text: TEXT.to_string(), items: Vec::new() });
    }

    #[test]
    fn verbose_includes_details() {
        let spans = [span("NAME", 0, 4, 0.5), span("PERSON", 0, 4, 0.9), span("LOCATION", 14, 16, 0.8)];
        let res = anonymize_verbose_with(TEXT, &spans, None, &Options::default()).unwrap();
        assert_eq!(res.result.text, "<PERSON> lives in <LOCATION>");
        assert_eq!(res.details.kept, 2);
        assert_eq!(res.details.dropped, vec![spans[0].clone()]);
        assert!(res.details.resolve <= res.details.total);
    }

    #[test]
    fn lists_builtin_operators() {
        let names = list_available_operators();
        for name in ["encrypt", "hash", "keep", "mask", "redact", "replace"] {
            assert!(names.contains(name), "missing {name}");
        }
        assert_eq!(names, default_registry().names());
    }
}
