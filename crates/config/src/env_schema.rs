//! JSON schema documents describing environment files
//!
//! Supports the subset of JSON Schema that makes sense for flat string maps:
//!
//! ```json
//! {
//!   "type": "object",
//!   "required": ["API_KEY"],
//!   "properties": {
//!     "API_KEY": { "type": "string", "pattern": "^[A-Za-z0-9_-]+$" },
//!     "PORT": { "type": "integer" },
//!     "APP_ENV": { "enum": ["development", "staging", "production"] }
//!   }
//! }
//! ```

use crate::validation::{Predicate, ValidationRule};
use regex::Regex;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use types::ConfigError;

/// Parsed schema document
#[derive(Debug, Clone)]
pub struct EnvSchema {
    rules: Vec<ValidationRule>,
}

impl EnvSchema {
    /// Load a schema document from disk
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::NotReadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let schema = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), rules = schema.rules.len(), "Loaded environment schema");
        Ok(schema)
    }

    /// Parse a schema document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("invalid schema JSON: {}", e)))?;

        let root = document
            .as_object()
            .ok_or_else(|| ConfigError::ParseError("schema root must be an object".to_string()))?;

        if let Some(kind) = root.get("type") {
            if kind.as_str() != Some("object") {
                return Err(ConfigError::ParseError(format!(
                    "schema root type must be \"object\", found {}",
                    kind
                )));
            }
        }

        let required = match root.get("required") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ConfigError::ParseError("\"required\" entries must be strings".to_string())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ConfigError::ParseError("\"required\" must be an array".to_string()));
            }
        };

        let empty = Map::new();
        let properties = match root.get("properties") {
            None => &empty,
            Some(Value::Object(properties)) => properties,
            Some(_) => {
                return Err(ConfigError::ParseError("\"properties\" must be an object".to_string()));
            }
        };

        let mut keys: Vec<&String> = properties.keys().collect();
        keys.sort();

        let mut rules = Vec::with_capacity(properties.len() + required.len());
        for key in keys {
            let is_required = required.iter().any(|r| r == key);
            rules.push(parse_property(key, &properties[key.as_str()], is_required)?);
        }
        for key in &required {
            if !properties.contains_key(key) {
                rules.push(ValidationRule::required(key.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<ValidationRule> {
        self.rules
    }
}

fn parse_property(key: &str, property: &Value, required: bool) -> Result<ValidationRule, ConfigError> {
    let property = property.as_object().ok_or_else(|| {
        ConfigError::ParseError(format!("property `{}` must be an object", key))
    })?;

    let mut rule = if required {
        ValidationRule::required(key)
    } else {
        ValidationRule::optional(key)
    };

    if let Some(pattern) = property.get("pattern") {
        let pattern = pattern.as_str().ok_or_else(|| {
            ConfigError::ParseError(format!("pattern for `{}` must be a string", key))
        })?;
        let regex = Regex::new(pattern).map_err(|e| {
            ConfigError::ParseError(format!("invalid pattern for `{}`: {}", key, e))
        })?;
        rule = rule.with_pattern(regex);
    }

    let mut predicates = Vec::new();

    match property.get("type").map(|t| (t, t.as_str())) {
        None | Some((_, Some("string"))) => {}
        Some((_, Some("integer"))) => predicates.push(Predicate::Integer),
        Some((_, Some("number"))) => predicates.push(Predicate::Number),
        Some((_, Some("boolean"))) => predicates.push(Predicate::Boolean),
        Some((other, _)) => {
            return Err(ConfigError::ParseError(format!(
                "unsupported type for `{}`: {}",
                key, other
            )));
        }
    }

    if let Some(values) = property.get("enum") {
        let values = values.as_array().ok_or_else(|| {
            ConfigError::ParseError(format!("enum for `{}` must be an array", key))
        })?;
        // JSON numbers and booleans are compared by their textual form
        let allowed = values
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        predicates.push(Predicate::OneOf(allowed));
    }

    if let Some(min) = property.get("minLength") {
        predicates.push(Predicate::MinLength(length_bound(key, "minLength", min)?));
    }
    if let Some(max) = property.get("maxLength") {
        predicates.push(Predicate::MaxLength(length_bound(key, "maxLength", max)?));
    }

    let predicate = match predicates.len() {
        0 => None,
        1 => predicates.pop(),
        _ => Some(Predicate::All(predicates)),
    };
    if let Some(predicate) = predicate {
        rule = rule.with_predicate(predicate);
    }

    Ok(rule)
}

fn length_bound(key: &str, name: &str, value: &Value) -> Result<usize, ConfigError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| ConfigError::ParseError(format!("{} for `{}` must be a non-negative integer", name, key)))
}
