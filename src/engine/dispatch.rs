//! Operator dispatch.
//!
//! Two steps, kept apart so the lookup stays a pure function of its inputs:
//!
//! ```text
//! entity_type ──▶ resolve_operator ──▶ &OperatorConfig
//!                  exact ─▶ "DEFAULT" ─▶ replace {}
//!                                │
//!                                ▼
//!                  prepare(registry) ──▶ PreparedOperator
//!                  lookup ─▶ validate ─▶ inject entity_type
//! ```

use crate::operators::params::ENTITY_TYPE;
use crate::{AnonymizeError, DEFAULT_ENTITY_KEY, Operator, OperatorConfig, OperatorConfigs, OperatorRegistry, Params};
use once_cell::sync::Lazy;

/// Operator used when neither the entity type nor `DEFAULT` is configured.
pub(crate) const FALLBACK_OPERATOR: &str = "replace";

static FALLBACK: Lazy<OperatorConfig> = Lazy::new(|| OperatorConfig::new(FALLBACK_OPERATOR));

/// Pick the config for `entity_type`: exact match, then `DEFAULT`, then
/// `replace` with no parameters. Never fails.
pub(crate) fn resolve_operator<'c>(entity_type: &str, configs: Option<&'c OperatorConfigs>) -> &'c OperatorConfig {
    configs
        .and_then(|c| c.get(entity_type).or_else(|| c.get(DEFAULT_ENTITY_KEY)))
        .unwrap_or_else(|| &*FALLBACK)
}

/// A validated operator ready to run for one entity type.
#[derive(Debug)]
pub(crate) struct PreparedOperator<'r> {
    operator: &'r dyn Operator,
    entity_type: String,
    params: Params,
}

impl PreparedOperator<'_> {
    pub(crate) fn name(&self) -> &str {
        self.operator.name()
    }

    pub(crate) fn apply(&self, text: &str) -> Result<String, AnonymizeError> {
        self.operator.operate(text, &self.params).map_err(|reason| AnonymizeError::InvalidParameter {
            operator: self.operator.name().to_string(),
            entity_type: self.entity_type.clone(),
            reason,
        })
    }
}

/// Look up `config`'s operator, validate its parameters, and inject the
/// entity type.
pub(crate) fn prepare<'r>(
    registry: &'r OperatorRegistry,
    entity_type: &str,
    config: &OperatorConfig,
) -> Result<PreparedOperator<'r>, AnonymizeError> {
    let operator = registry.get(&config.operator_name).ok_or_else(|| AnonymizeError::UnknownOperator {
        operator: config.operator_name.clone(),
        entity_type: entity_type.to_string(),
    })?;

    operator.validate(&config.params).map_err(|reason| AnonymizeError::InvalidParameter {
        operator: config.operator_name.clone(),
        entity_type: entity_type.to_string(),
        reason,
    })?;

    let mut params = config.params.clone();
    params.insert(ENTITY_TYPE.to_string(), entity_type.into());

    Ok(PreparedOperator { operator, entity_type: entity_type.to_string(), params })
}
