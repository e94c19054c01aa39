use super::params::{entity_type, optional_str};
use super::Operator;
use crate::{ParamError, Params};

const NEW_VALUE: &str = "new_value";

/// Replaces the text with `new_value`, or `<ENTITY_TYPE>` when no value is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replace;

impl Operator for Replace {
    fn name(&self) -> &str {
        "replace"
    }

    fn validate(&self, params: &Params) -> Result<(), ParamError> {
        optional_str(params, NEW_VALUE).map(|_| ())
    }

    fn operate(&self, _text: &str, params: &Params) -> Result<String, ParamError> {
        match optional_str(params, NEW_VALUE)? {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Ok(format!("<{}>", entity_type(params))),
        }
    }
}
