use super::{Operator, OperatorTraits};
use crate::{ParamError, Params};

/// An operator backed by a closure.
///
/// ```
/// use redacta::{FnOperator, OperatorRegistry};
///
/// let registry = OperatorRegistry::builtin()
///     .with_operator(FnOperator::new("upper", |text, _params| text.to_uppercase()));
/// assert!(registry.get("upper").is_some());
/// ```
pub struct FnOperator<F> {
    name: String,
    traits: OperatorTraits,
    func: F,
}

impl<F> FnOperator<F>
where
    F: Fn(&str, &Params) -> String + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self { name: name.into(), traits: OperatorTraits::DETERMINISTIC, func }
    }

    /// Override the advertised traits (deterministic by default).
    pub fn with_traits(mut self, traits: OperatorTraits) -> Self {
        self.traits = traits;
        self
    }
}

impl<F> std::fmt::Debug for FnOperator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperator")
            .field("name", &self.name)
            .field("traits", &self.traits)
            .field("func", &"<function>")
            .finish()
    }
}

impl<F> Operator for FnOperator<F>
where
    F: Fn(&str, &Params) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn traits(&self) -> OperatorTraits {
        self.traits
    }

    fn validate(&self, _params: &Params) -> Result<(), ParamError> {
        Ok(())
    }

    fn operate(&self, text: &str, params: &Params) -> Result<String, ParamError> {
        Ok((self.func)(text, params))
    }
}
