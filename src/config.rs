//! Operator configuration.
//!
//! Callers choose an operator per entity type through an [`OperatorConfigs`]
//! map. A config stored under [`DEFAULT_ENTITY_KEY`] applies to every entity
//! type without its own entry; when neither exists the engine falls back to
//! `replace` with no parameters.
//!
//! Configs deserialize from the flat JSON shape used on the wire:
//!
//! ```text
//! { "type": "mask", "masking_char": "*", "chars_to_mask": 4, "from_end": true }
//! ```
//!
//! and parse from the compact CLI form `mask:masking_char=*,chars_to_mask=4`.

use crate::error::ConfigParseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Operator parameters: a JSON object.
pub type Params = serde_json::Map<String, Value>;

/// Per-entity-type operator configuration.
pub type OperatorConfigs = HashMap<String, OperatorConfig>;

/// Key whose config applies to entity types without their own entry.
pub const DEFAULT_ENTITY_KEY: &str = "DEFAULT";

/// The operator to run for an entity type, plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    #[serde(rename = "type")]
    pub operator_name: String,
    #[serde(flatten)]
    pub params: Params,
}

impl OperatorConfig {
    /// Config for `operator_name` with no parameters.
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self { operator_name: operator_name.into(), params: Params::new() }
    }

    pub fn with_params(operator_name: impl Into<String>, params: Params) -> Self {
        Self { operator_name: operator_name.into(), params }
    }

    /// Add or overwrite a single parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse `ENTITY=operator[:key=value,...]` into its entity key and config.
    ///
    /// ```
    /// use redacta::OperatorConfig;
    ///
    /// let (entity, config) = OperatorConfig::parse_assignment("PHONE=mask:masking_char=#,chars_to_mask=4,from_end=true").unwrap();
    /// assert_eq!(entity, "PHONE");
    /// assert_eq!(config.operator_name, "mask");
    /// assert_eq!(config.params["chars_to_mask"], 4);
    /// ```
    pub fn parse_assignment(input: &str) -> Result<(String, OperatorConfig), ConfigParseError> {
        let caps = regex!(r"^([A-Za-z0-9_]+)=(.+)$")
            .captures(input.trim())
            .ok_or_else(|| ConfigParseError::InvalidAssignment(input.to_string()))?;
        let config = caps[2].parse::<OperatorConfig>()?;
        Ok((caps[1].to_string(), config))
    }
}

impl FromStr for OperatorConfig {
    type Err = ConfigParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = regex!(r"^([A-Za-z_][A-Za-z0-9_\-]*)(?::(.*))?$")
            .captures(s.trim())
            .ok_or_else(|| ConfigParseError::InvalidName(s.to_string()))?;

        let mut config = OperatorConfig::new(&caps[1]);
        let Some(rest) = caps.get(2) else {
            return Ok(config);
        };

        for pair in rest.as_str().split(',').filter(|p| !p.trim().is_empty()) {
            let param = regex!(r"^\s*([A-Za-z_][A-Za-z0-9_]*)=(.*)$")
                .captures(pair)
                .ok_or_else(|| ConfigParseError::InvalidParam(pair.to_string()))?;
            config.params.insert(param[1].to_string(), parse_scalar(&param[2]));
        }

        Ok(config)
    }
}

/// JSON scalars (`4`, `true`, `"x"`, `null`) keep their type; anything else is
/// taken as a raw string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => v,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_operator_name() {
        let config: OperatorConfig = "redact".parse().unwrap();
        assert_eq!(config, OperatorConfig::new("redact"));
    }

    #[test]
    fn parses_typed_params() {
        let config: OperatorConfig = "mask:masking_char=*,chars_to_mask=3,from_end=false".parse().unwrap();
        assert_eq!(config.operator_name, "mask");
        assert_eq!(config.params["masking_char"], json!("*"));
        assert_eq!(config.params["chars_to_mask"], json!(3));
        assert_eq!(config.params["from_end"], json!(false));
    }

    #[test]
    fn keeps_unparseable_values_as_strings() {
        let config: OperatorConfig = "replace:new_value=<NAME>".parse().unwrap();
        assert_eq!(config.params["new_value"], json!("<NAME>"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!("".parse::<OperatorConfig>(), Err(ConfigParseError::InvalidName(_))));
        assert!(matches!("mask:chars_to_mask".parse::<OperatorConfig>(), Err(ConfigParseError::InvalidParam(_))));
        assert!(matches!(OperatorConfig::parse_assignment("mask"), Err(ConfigParseError::InvalidAssignment(_))));
    }

    #[test]
    fn deserializes_flat_json_shape() {
        let config: OperatorConfig =
            serde_json::from_value(json!({ "type": "hash", "hash_type": "sha512" })).unwrap();
        assert_eq!(config.operator_name, "hash");
        assert_eq!(config.params.len(), 1);
        assert_eq!(config.params["hash_type"], json!("sha512"));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back, json!({ "type": "hash", "hash_type": "sha512" }));
    }
}
