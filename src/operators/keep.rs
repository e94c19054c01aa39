use super::{Operator, OperatorTraits};
use crate::{ParamError, Params};

/// Leaves the text untouched while still reporting the entity in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keep;

impl Operator for Keep {
    fn name(&self) -> &str {
        "keep"
    }

    fn traits(&self) -> OperatorTraits {
        OperatorTraits::all()
    }

    fn validate(&self, _params: &Params) -> Result<(), ParamError> {
        Ok(())
    }

    fn operate(&self, text: &str, _params: &Params) -> Result<String, ParamError> {
        Ok(text.to_string())
    }
}
