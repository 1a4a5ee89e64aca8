//! Utility functions and helpers

/// Replacement shown instead of sensitive values
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 6] = ["key", "token", "secret", "password", "auth", "credential"];

/// Generate a correlation ID for request tracing
pub fn generate_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Whether a variable name looks like it holds sensitive data
pub fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    SENSITIVE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Value safe to print for the given variable
pub fn redact<'a>(key: &str, value: &'a str) -> &'a str {
    if is_sensitive_key(key) {
        REDACTED
    } else {
        value
    }
}

/// Whether the string is a usable variable name
pub fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_keys() {
        assert!(is_sensitive_key("API_KEY"));
        assert!(is_sensitive_key("GITHUB_TOKEN"));
        assert!(is_sensitive_key("db_password"));
        assert!(is_sensitive_key("OAUTH_CLIENT"));
        assert!(!is_sensitive_key("APP_ENV"));
        assert!(!is_sensitive_key("DATABASE_URL"));
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("API_KEY", "abc"), REDACTED);
        assert_eq!(redact("APP_NAME", "actorCLI"), "actorCLI");
    }

    #[test]
    fn test_var_names() {
        assert!(is_valid_var_name("APP_ENV"));
        assert!(is_valid_var_name("app.name-2"));
        assert!(!is_valid_var_name(""));
        assert!(!is_valid_var_name("MY VAR"));
        assert!(!is_valid_var_name("export FOO"));
    }

    #[test]
    fn test_correlation_ids_are_unique() {
        assert_ne!(generate_correlation_id(), generate_correlation_id());
    }
}
