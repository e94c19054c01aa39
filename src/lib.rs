#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
mod operators;

pub use api::{
    AnonymizeDetails, AnonymizeResultVerbose, Options, anonymize, anonymize_verbose_with, anonymize_with,
    default_registry, list_available_operators,
};
pub use config::{DEFAULT_ENTITY_KEY, OperatorConfig, OperatorConfigs, Params};
pub use engine::{Anonymizer, ConflictPolicy, RunMetrics, RunResult};
pub use error::{AnonymizeError, ConfigParseError, ParamError, SpanFault};
pub use operators::{
    Encrypt, FnOperator, Hash, Keep, Mask, Operator, OperatorRegistry, OperatorTraits, Redact, Replace,
};

use serde::{Deserialize, Serialize};

#[doc(hidden)]
pub use serde_json as __serde_json;

// --- Data model -------------------------------------------------------------

/// A sensitive entity reported by a detector.
///
/// `start`/`end` are byte offsets into the original text, half-open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSpan {
    /// Entity type, e.g. `"PERSON"` or `"PHONE_NUMBER"`.
    pub entity_type: String,
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
    /// Detector confidence.
    pub score: f64,
}

impl DetectedSpan {
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f64) -> Self {
        Self { entity_type: entity_type.into(), start, end, score }
    }

    /// Number of bytes covered by the span (zero for malformed spans).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the two half-open ranges share at least one offset.
    ///
    /// ```text
    /// [0, 4) vs [3, 6) -> true
    /// [0, 4) vs [4, 6) -> false (adjacent)
    /// ```
    pub fn intersects(&self, other: &DetectedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A substitution applied to the output text.
///
/// Offsets are valid against [`EngineResult::text`], not the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntity {
    /// Name of the operator that produced `text`.
    pub operator: String,
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    /// The replacement written into the output text.
    pub text: String,
}

/// Output of a successful anonymization run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineResult {
    /// The transformed text.
    pub text: String,
    /// Applied substitutions, ascending by `start`.
    pub items: Vec<OutputEntity>,
}

impl EngineResult {
    /// Slice of the output text covered by `item`.
    pub fn slice(&self, item: &OutputEntity) -> Option<&str> {
        self.text.get(item.start..item.end)
    }
}
