//! Rule values: a severity, optionally followed by an opaque options payload

use crate::error::ConfigError;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Configured value of a single rule
///
/// Accepted forms:
///
/// ```toml
/// no-console = "warn"
/// no-var = 2
/// eqeqeq = ["error", "always"]
/// ```
///
/// The options are never interpreted here; they are handed to the rule
/// engine untouched. A later fragment that sets the same rule replaces the
/// whole value, options included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct RuleValue {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleValue {
    /// A bare severity without options
    pub fn bare(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    /// A severity with an options payload
    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    pub fn off() -> Self {
        Self::bare(Severity::Off)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Parses the value configured for `rule`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRuleValue` naming the rule if `value`
    /// is neither a severity nor a list starting with one.
    pub fn from_config(rule: &str, value: Value) -> Result<Self, ConfigError> {
        Self::try_from(value).map_err(|message| ConfigError::InvalidRuleValue {
            rule: rule.to_string(),
            message,
        })
    }
}

/// Checks every `rules` table of the `config` layers in a raw document
///
/// Run before typed deserialization so a bad value is reported against
/// its rule rather than as a generic parse error.
pub(crate) fn check_layer_rules(document: &Value) -> Result<(), ConfigError> {
    let Some(layers) = document.get("config").and_then(Value::as_array) else {
        return Ok(());
    };
    for rules in layers
        .iter()
        .filter_map(|layer| layer.get("rules").and_then(Value::as_object))
    {
        for (rule, value) in rules {
            RuleValue::from_config(rule, value.clone())?;
        }
    }
    Ok(())
}

fn severity_from_value(value: &Value) -> Result<Severity, String> {
    match value {
        Value::String(token) => Severity::from_token(token).ok_or_else(|| {
            format!(
                "unknown severity '{}', expected one of off, warn, error",
                token
            )
        }),
        Value::Number(n) => n
            .as_u64()
            .and_then(Severity::from_ordinal)
            .ok_or_else(|| format!("severity {} out of range, expected 0, 1 or 2", n)),
        other => Err(format!("expected a severity, found {}", other)),
    }
}

impl TryFrom<Value> for RuleValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(mut items) => {
                if items.is_empty() {
                    return Err("rule list must start with a severity".to_string());
                }
                let severity = severity_from_value(&items[0])?;
                let options = items.split_off(1);
                Ok(RuleValue { severity, options })
            }
            other => Ok(RuleValue::bare(severity_from_value(&other)?)),
        }
    }
}

impl From<RuleValue> for Value {
    fn from(rule: RuleValue) -> Self {
        let severity = Value::String(rule.severity.as_str().to_string());
        if rule.options.is_empty() {
            severity
        } else {
            let mut items = Vec::with_capacity(rule.options.len() + 1);
            items.push(severity);
            items.extend(rule.options);
            Value::Array(items)
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        for option in &self.options {
            write!(f, " {}", option)?;
        }
        Ok(())
    }
}
