//! Character masking.
//!
//! Counts are in characters, not bytes, so multi-byte text masks the way a
//! reader would expect:
//!
//! ```text
//! "José" chars_to_mask=2 from_end=true  -> "Jo**"
//! "José" chars_to_mask=9 from_end=false -> "****"
//! ```

use super::params::{required_bool, required_count, required_str};
use super::{Operator, OperatorTraits};
use crate::{ParamError, Params};

const MASKING_CHAR: &str = "masking_char";
const CHARS_TO_MASK: &str = "chars_to_mask";
const FROM_END: &str = "from_end";

/// Overwrites up to `chars_to_mask` characters with `masking_char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mask;

impl Mask {
    fn masking_char(params: &Params) -> Result<char, ParamError> {
        let raw = required_str(params, MASKING_CHAR)?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParamError::Constraint {
                name: MASKING_CHAR.to_string(),
                constraint: "must be exactly one character".to_string(),
            }),
        }
    }
}

impl Operator for Mask {
    fn name(&self) -> &str {
        "mask"
    }

    fn traits(&self) -> OperatorTraits {
        OperatorTraits::DETERMINISTIC | OperatorTraits::LENGTH_PRESERVING
    }

    fn validate(&self, params: &Params) -> Result<(), ParamError> {
        Self::masking_char(params)?;
        required_count(params, CHARS_TO_MASK)?;
        required_bool(params, FROM_END)?;
        Ok(())
    }

    fn operate(&self, text: &str, params: &Params) -> Result<String, ParamError> {
        let masking_char = Self::masking_char(params)?;
        let chars_to_mask = required_count(params, CHARS_TO_MASK)?;
        let from_end = required_bool(params, FROM_END)?;

        let total = text.chars().count();
        let masked = chars_to_mask.min(total);
        let (mask_from, mask_to) = if from_end { (total - masked, total) } else { (0, masked) };

        Ok(text
            .chars()
            .enumerate()
            .map(|(idx, c)| if (mask_from..mask_to).contains(&idx) { masking_char } else { c })
            .collect())
    }
}
