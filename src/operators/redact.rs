use super::Operator;
use crate::{ParamError, Params};

/// Removes the text entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redact;

impl Operator for Redact {
    fn name(&self) -> &str {
        "redact"
    }

    fn validate(&self, _params: &Params) -> Result<(), ParamError> {
        Ok(())
    }

    fn operate(&self, _text: &str, _params: &Params) -> Result<String, ParamError> {
        Ok(String::new())
    }
}
