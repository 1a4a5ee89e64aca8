//! Environment validation against rule sets

use regex::Regex;
use types::{ActorError, EnvironmentMap, Result};

/// Check applied to a present, non-empty value
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Value must be one of the listed strings
    OneOf(Vec<String>),
    /// Minimum length in characters
    MinLength(usize),
    /// Maximum length in characters
    MaxLength(usize),
    /// Value must parse as an integer
    Integer,
    /// Value must parse as a finite number
    Number,
    /// Value must be `true` or `false`
    Boolean,
    /// Every inner predicate must hold
    All(Vec<Predicate>),
    /// Check implemented in code
    Custom(fn(&str) -> bool),
}

impl Predicate {
    /// Evaluate the predicate
    pub fn check(&self, value: &str) -> bool {
        match self {
            Predicate::OneOf(allowed) => allowed.iter().any(|a| a == value),
            Predicate::MinLength(min) => value.chars().count() >= *min,
            Predicate::MaxLength(max) => value.chars().count() <= *max,
            Predicate::Integer => value.parse::<i64>().is_ok(),
            Predicate::Number => value.parse::<f64>().map(f64::is_finite).unwrap_or(false),
            Predicate::Boolean => matches!(value, "true" | "false"),
            Predicate::All(inner) => inner.iter().all(|p| p.check(value)),
            Predicate::Custom(f) => f(value),
        }
    }
}

/// One schema entry
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub key: String,
    pub required: bool,
    pub pattern: Option<Regex>,
    pub predicate: Option<Predicate>,
}

impl ValidationRule {
    /// Rule for a variable that must be present and non-empty
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            pattern: None,
            predicate: None,
        }
    }

    /// Rule for a variable that is only checked when present
    pub fn optional(key: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(key)
        }
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }
}

/// Outcome of validating an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every rule passed, carries the validated map
    Valid(EnvironmentMap),
    /// At least one rule failed, carries every violation in rule order
    Invalid(Vec<String>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Violation messages, empty when valid
    pub fn violations(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Invalid(violations) => violations,
        }
    }

    /// Convert into the validated map or `ValidationFailed`
    pub fn into_result(self) -> Result<EnvironmentMap> {
        match self {
            ValidationResult::Valid(env) => Ok(env),
            ValidationResult::Invalid(violations) => Err(ActorError::ValidationFailed { violations }),
        }
    }
}

/// Environment validator
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate `env` against every rule, collecting all violations
    pub fn validate(env: &EnvironmentMap, rules: &[ValidationRule]) -> ValidationResult {
        let violations: Vec<String> = rules
            .iter()
            .filter_map(|rule| Self::check_rule(env, rule))
            .flatten()
            .collect();

        if violations.is_empty() {
            ValidationResult::Valid(env.clone())
        } else {
            ValidationResult::Invalid(violations)
        }
    }

    fn check_rule(env: &EnvironmentMap, rule: &ValidationRule) -> Option<Vec<String>> {
        let value = env.get(&rule.key).filter(|v| !v.is_empty());

        let Some(value) = value else {
            return rule
                .required
                .then(|| vec![format!("missing required variable `{}`", rule.key)]);
        };

        let mut violations = Vec::new();
        if let Some(ref pattern) = rule.pattern {
            if !pattern.is_match(value) {
                violations.push(format!("invalid format for `{}`", rule.key));
            }
        }
        if let Some(ref predicate) = rule.predicate {
            if !predicate.check(value) {
                violations.push(format!("invalid value for `{}`", rule.key));
            }
        }
        Some(violations)
    }
}

/// Rules used when no schema document is present
pub fn builtin_rules() -> Vec<ValidationRule> {
    let identifier = || builtin_pattern(r"^[a-zA-Z0-9_-]+$");

    vec![
        ValidationRule::required("APP_ENV").with_predicate(Predicate::OneOf(vec![
            "development".to_string(),
            "staging".to_string(),
            "production".to_string(),
        ])),
        ValidationRule::required("APP_NAME").with_pattern(identifier()),
        ValidationRule::required("API_KEY").with_pattern(identifier()),
        ValidationRule::required("DATABASE_URL").with_pattern(builtin_pattern(r"^[a-zA-Z]+://.+")),
        ValidationRule::required("GITHUB_TOKEN").with_pattern(identifier()),
    ]
}

fn builtin_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in validation pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvironmentMap {
        pairs.iter().copied().collect()
    }

    fn complete_env() -> EnvironmentMap {
        env(&[
            ("APP_ENV", "staging"),
            ("APP_NAME", "actor-cli"),
            ("API_KEY", "abc_123"),
            ("DATABASE_URL", "postgres://db/app"),
            ("GITHUB_TOKEN", "ghp_token"),
        ])
    }

    #[test]
    fn test_missing_required_key_is_named() {
        let rules = vec![ValidationRule::required("API_KEY")];
        let result = SchemaValidator::validate(&env(&[("APP_ENV", "development")]), &rules);

        assert!(!result.is_valid());
        assert_eq!(result.violations(), ["missing required variable `API_KEY`"]);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let rules = vec![ValidationRule::required("API_KEY")];
        let result = SchemaValidator::validate(&env(&[("API_KEY", "")]), &rules);
        assert_eq!(result.violations(), ["missing required variable `API_KEY`"]);
    }

    #[test]
    fn test_valid_map_is_returned_unchanged() {
        let input = complete_env();
        let result = SchemaValidator::validate(&input, &builtin_rules());
        assert_eq!(result, ValidationResult::Valid(input));
    }

    #[test]
    fn test_all_violations_are_accumulated() {
        let input = env(&[
            ("APP_ENV", "qa"),
            ("APP_NAME", "bad name!"),
            ("DATABASE_URL", "localhost"),
        ]);

        let result = SchemaValidator::validate(&input, &builtin_rules());

        assert_eq!(
            result.violations(),
            [
                "invalid value for `APP_ENV`",
                "invalid format for `APP_NAME`",
                "missing required variable `API_KEY`",
                "invalid format for `DATABASE_URL`",
                "missing required variable `GITHUB_TOKEN`",
            ]
        );
    }

    #[test]
    fn test_optional_rule_only_checks_present_values() {
        let rules = vec![ValidationRule::optional("PORT").with_predicate(Predicate::Integer)];

        assert!(SchemaValidator::validate(&env(&[]), &rules).is_valid());
        assert!(SchemaValidator::validate(&env(&[("PORT", "")]), &rules).is_valid());
        assert_eq!(
            SchemaValidator::validate(&env(&[("PORT", "eighty")]), &rules).violations(),
            ["invalid value for `PORT`"]
        );
    }

    #[test]
    fn test_pattern_and_predicate_both_reported() {
        let rules = vec![ValidationRule::required("CODE")
            .with_pattern(Regex::new("^[A-Z]+$").unwrap())
            .with_predicate(Predicate::MinLength(5))];

        let result = SchemaValidator::validate(&env(&[("CODE", "ab")]), &rules);
        assert_eq!(
            result.violations(),
            ["invalid format for `CODE`", "invalid value for `CODE`"]
        );
    }

    #[test]
    fn test_custom_predicate() {
        fn even_length(value: &str) -> bool {
            value.len() % 2 == 0
        }
        let rules = vec![ValidationRule::required("PAIR").with_predicate(Predicate::Custom(even_length))];

        assert!(SchemaValidator::validate(&env(&[("PAIR", "ab")]), &rules).is_valid());
        assert!(!SchemaValidator::validate(&env(&[("PAIR", "abc")]), &rules).is_valid());
    }

    #[test]
    fn test_predicates() {
        assert!(Predicate::Number.check("3.14"));
        assert!(!Predicate::Number.check("NaN"));
        assert!(Predicate::Boolean.check("false"));
        assert!(!Predicate::Boolean.check("yes"));
        assert!(Predicate::MaxLength(3).check("abc"));
        assert!(!Predicate::All(vec![Predicate::Integer, Predicate::MaxLength(2)]).check("100"));
    }

    #[test]
    fn test_into_result() {
        let err = SchemaValidator::validate(&env(&[]), &[ValidationRule::required("A")])
            .into_result()
            .unwrap_err();
        match err {
            ActorError::ValidationFailed { violations } => assert_eq!(violations.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
