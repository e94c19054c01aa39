//! Error types.
//!
//! Every failure aborts the whole anonymization call. Conflict resolution never
//! fails; it drops spans instead.

/// Why a detected span was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanFault {
    #[error("start must be strictly less than end")]
    EmptyOrReversed,

    #[error("end is past the text length {len}")]
    OutOfBounds { len: usize },

    #[error("offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("score is not a number")]
    InvalidScore,
}

/// Errors returned by [`anonymize`](crate::anonymize) and friends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnonymizeError {
    #[error("invalid span {entity_type} at {start}..{end}: {reason}")]
    InvalidSpan { entity_type: String, start: usize, end: usize, reason: SpanFault },

    #[error("invalid parameters for operator '{operator}' on {entity_type}: {reason}")]
    InvalidParameter { operator: String, entity_type: String, reason: ParamError },

    #[error("unknown operator '{operator}' configured for {entity_type}")]
    UnknownOperator { operator: String, entity_type: String },
}

/// A parameter constraint violated by an operator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("missing required parameter '{0}'")]
    Missing(String),

    #[error("parameter '{name}' must be {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error("parameter '{name}' {constraint}")]
    Constraint { name: String, constraint: String },
}

/// Failure parsing the compact `name[:key=value,...]` operator syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigParseError {
    #[error("invalid operator name in '{0}'")]
    InvalidName(String),

    #[error("invalid parameter '{0}' (expected key=value)")]
    InvalidParam(String),

    #[error("invalid entity assignment '{0}' (expected ENTITY=operator[:key=value,...])")]
    InvalidAssignment(String),
}
