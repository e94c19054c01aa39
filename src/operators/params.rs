//! Typed accessors over [`Params`].
//!
//! `null` counts as absent so that JSON configs can clear a parameter.

use crate::{ParamError, Params};
use serde_json::Value;

/// Key under which the engine injects the entity type.
pub(crate) const ENTITY_TYPE: &str = "entity_type";

fn present<'p>(params: &'p Params, name: &str) -> Option<&'p Value> {
    params.get(name).filter(|v| !v.is_null())
}

pub(crate) fn optional_str<'p>(params: &'p Params, name: &str) -> Result<Option<&'p str>, ParamError> {
    match present(params, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ParamError::WrongType { name: name.to_string(), expected: "a string" }),
    }
}

pub(crate) fn required_str<'p>(params: &'p Params, name: &str) -> Result<&'p str, ParamError> {
    optional_str(params, name)?.ok_or_else(|| ParamError::Missing(name.to_string()))
}

pub(crate) fn required_bool(params: &Params, name: &str) -> Result<bool, ParamError> {
    match present(params, name) {
        None => Err(ParamError::Missing(name.to_string())),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ParamError::WrongType { name: name.to_string(), expected: "a boolean" }),
    }
}

/// A non-negative integer parameter.
pub(crate) fn required_count(params: &Params, name: &str) -> Result<usize, ParamError> {
    let value = present(params, name).ok_or_else(|| ParamError::Missing(name.to_string()))?;
    match value {
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(v), _) => Ok(usize::try_from(v).unwrap_or(usize::MAX)),
            (None, Some(_)) => {
                Err(ParamError::Constraint { name: name.to_string(), constraint: "must not be negative".to_string() })
            }
            _ => Err(ParamError::WrongType { name: name.to_string(), expected: "an integer" }),
        },
        _ => Err(ParamError::WrongType { name: name.to_string(), expected: "an integer" }),
    }
}

/// The injected entity type, or `""` when called outside the engine.
pub(crate) fn entity_type(params: &Params) -> &str {
    params.get(ENTITY_TYPE).and_then(Value::as_str).unwrap_or_default()
}
