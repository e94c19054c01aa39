//! Operator registry.
//!
//! A registry is assembled once (builder style) and then only read. The
//! process-wide default lives behind a `Lazy` in `api.rs`; callers who need
//! custom operators build their own and hand it to [`Anonymizer`].
//!
//! [`Anonymizer`]: crate::Anonymizer

use super::{Encrypt, Hash, Keep, Mask, Operator, Redact, Replace};
use std::collections::{BTreeMap, BTreeSet};

/// Name-indexed set of operators.
#[derive(Default)]
pub struct OperatorRegistry {
    operators: BTreeMap<String, Box<dyn Operator>>,
}

impl OperatorRegistry {
    /// A registry with no operators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in operators.
    pub fn builtin() -> Self {
        Self::empty()
            .with_operator(Replace)
            .with_operator(Redact)
            .with_operator(Mask)
            .with_operator(Hash)
            .with_operator(Keep)
            .with_operator(Encrypt)
    }

    /// Register `operator` under its name, replacing any operator already
    /// registered with that name.
    pub fn with_operator(mut self, operator: impl Operator + 'static) -> Self {
        self.operators.insert(operator.name().to_string(), Box::new(operator));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.operators.get(name).map(|op| op.as_ref())
    }

    /// Registered operator names, sorted.
    pub fn names(&self) -> BTreeSet<String> {
        self.operators.keys().cloned().collect()
    }

    /// Iterate `(name, operator)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Operator)> {
        self.operators.iter().map(|(name, op)| (name.as_str(), op.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry").field("operators", &self.operators.keys()).finish()
    }
}
