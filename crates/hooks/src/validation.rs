//! Hook that rejects environments breaking the rule set

use config::{builtin_rules, EnvSchema, SchemaValidator, ValidationResult, ValidationRule};
use types::{EnvironmentMap, HookError};

/// Validates the snapshot against a fixed rule set
#[derive(Debug, Clone)]
pub struct ValidationHook {
    rules: Vec<ValidationRule>,
}

impl ValidationHook {
    /// Create a new validation hook
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// Hook checking the built-in variables
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    /// Hook checking the rules of a schema document
    pub fn from_schema(schema: EnvSchema) -> Self {
        Self::new(schema.into_rules())
    }

    pub fn name(&self) -> &str {
        "validation"
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Validate the snapshot, returning every violation on failure
    pub async fn run(&self, env: &EnvironmentMap) -> Result<(), HookError> {
        match SchemaValidator::validate(env, &self.rules) {
            ValidationResult::Valid(_) => {
                tracing::debug!(hook = %self.name(), rules = self.rules.len(), "Environment is valid");
                Ok(())
            }
            ValidationResult::Invalid(violations) => {
                for violation in &violations {
                    tracing::error!(hook = %self.name(), "{}", violation);
                }
                Err(HookError::Validation {
                    hook: self.name().to_string(),
                    violations,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_env() -> EnvironmentMap {
        [
            ("APP_ENV", "production"),
            ("APP_NAME", "actorCLI"),
            ("API_KEY", "key-123"),
            ("DATABASE_URL", "postgres://localhost/actor"),
            ("GITHUB_TOKEN", "ghp_abc"),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_builtin_rules_accept_complete_env() {
        assert!(ValidationHook::builtin().run(&complete_env()).await.is_ok());
    }

    #[tokio::test]
    async fn test_reports_every_violation() {
        let env: EnvironmentMap = [
            ("APP_ENV", "qa"),
            ("APP_NAME", "actor cli"),
            ("DATABASE_URL", "postgres://localhost/actor"),
            ("GITHUB_TOKEN", "ghp_abc"),
        ]
        .into_iter()
        .collect();

        let err = ValidationHook::builtin().run(&env).await.unwrap_err();
        let HookError::Validation { hook, violations } = err;
        assert_eq!(hook, "validation");
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&"missing required variable `API_KEY`".to_string()));
        assert!(violations.contains(&"invalid value for `APP_ENV`".to_string()));
        assert!(violations.contains(&"invalid format for `APP_NAME`".to_string()));
    }

    #[tokio::test]
    async fn test_schema_rules() {
        let schema = EnvSchema::parse(r#"{"required": ["PORT"], "properties": {"PORT": {"type": "integer"}}}"#)
            .unwrap();
        let hook = ValidationHook::from_schema(schema);

        let ok: EnvironmentMap = [("PORT", "8080")].into_iter().collect();
        let bad: EnvironmentMap = [("PORT", "eighty")].into_iter().collect();
        assert!(hook.run(&ok).await.is_ok());
        assert!(hook.run(&bad).await.is_err());
    }
}
