//! Transformation operators.
//!
//! An operator turns the substring covered by one entity into its replacement.
//! Operators are looked up by name in an [`OperatorRegistry`]; the engine picks
//! the name per entity type from the caller's configs (see `engine::dispatch`).
//!
//! ```text
//! OperatorConfig { "mask", params } ──▶ registry.get("mask")
//!                                         │
//!                      validate(params) ◀─┤
//!                                         ▼
//!           operate("555-1234", params + entity_type) ──▶ "555-****"
//! ```
//!
//! ## Built-ins
//!
//! - `replace`: `<ENTITY_TYPE>` or `new_value`.
//! - `redact`: removes the text.
//! - `mask`: overwrites characters with `masking_char`.
//! - `hash`: hex digest (`sha256`, `sha512` or `md5`).
//! - `encrypt`: AES-GCM ciphertext under `key`, base64 encoded.
//! - `keep`: leaves the text as is.
//!
//! Additional operators can be added with [`OperatorRegistry::with_operator`];
//! [`FnOperator`] wraps a closure.

#[path = "operators/custom.rs"]
mod custom;
#[path = "operators/encrypt.rs"]
mod encrypt;
#[path = "operators/hash.rs"]
mod hash;
#[path = "operators/keep.rs"]
mod keep;
#[path = "operators/mask.rs"]
mod mask;
#[path = "operators/params.rs"]
pub(crate) mod params;
#[path = "operators/redact.rs"]
mod redact;
#[path = "operators/registry.rs"]
mod registry;
#[path = "operators/replace.rs"]
mod replace;


pub use custom::FnOperator;
pub use encrypt::Encrypt;
pub use hash::Hash;
pub use keep::Keep;
pub use mask::Mask;
pub use redact::Redact;
pub use registry::OperatorRegistry;
pub use replace::Replace;

use crate::{ParamError, Params};

bitflags::bitflags! {
    /// Properties an operator advertises for discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OperatorTraits: u8 {
        /// The original text can be recovered from the output.
        const REVERSIBLE        = 1 << 0;
        /// Output has the same number of characters as the input.
        const LENGTH_PRESERVING = 1 << 1;
        /// Same input and params always give the same output.
        const DETERMINISTIC     = 1 << 2;
    }
}

/// A text transformation applied to one entity.
///
/// `params` passed to [`Operator::operate`] always contain an `entity_type`
/// string in addition to the configured parameters. Validation sees the
/// configured parameters only.
pub trait Operator: Send + Sync {
    /// Registry name, e.g. `"mask"`.
    fn name(&self) -> &str;

    fn traits(&self) -> OperatorTraits {
        OperatorTraits::DETERMINISTIC
    }

    /// Check `params` against the operator's parameter schema.
    fn validate(&self, params: &Params) -> Result<(), ParamError>;

    /// Produce the replacement for `text`.
    fn operate(&self, text: &str, params: &Params) -> Result<String, ParamError>;
}

impl std::fmt::Debug for dyn Operator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator").field("name", &self.name()).field("traits", &self.traits()).finish()
    }
}
