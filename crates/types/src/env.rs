//! Environment variable snapshot types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ActorError;

/// Immutable snapshot of parsed environment variables
///
/// Keys are unique and iterate in ascending order. A snapshot is never
/// modified after it has been handed out: merging produces a new map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentMap {
    vars: BTreeMap<String, String>,
}

impl EnvironmentMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether the variable exists (possibly with an empty value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the map holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Variable names in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Build a new snapshot where `self` takes precedence over `defaults`
    pub fn merged_over(&self, defaults: &EnvironmentMap) -> EnvironmentMap {
        let mut vars = defaults.vars.clone();
        vars.extend(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        EnvironmentMap { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for EnvironmentMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnvironmentMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Deployment stage selecting which environment file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Every environment, in prompt order
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ActorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == lowered)
            .ok_or_else(|| ActorError::InvalidEnvironment {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_duplicates_win() {
        let env: EnvironmentMap = [("A", "1"), ("B", "2"), ("A", "3")].into_iter().collect();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("A"), Some("3"));
    }

    #[test]
    fn test_merged_over_defaults() {
        let defaults: EnvironmentMap = [("APP_ENV", "development"), ("APP_NAME", "actorCLI")]
            .into_iter()
            .collect();
        let file: EnvironmentMap = [("APP_ENV", "staging"), ("API_KEY", "abc")].into_iter().collect();

        let merged = file.merged_over(&defaults);

        assert_eq!(merged.get("APP_ENV"), Some("staging"));
        assert_eq!(merged.get("APP_NAME"), Some("actorCLI"));
        assert_eq!(merged.get("API_KEY"), Some("abc"));
        // inputs are left untouched
        assert_eq!(file.len(), 2);
        assert_eq!(defaults.get("APP_ENV"), Some("development"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let env: EnvironmentMap = [("B", "2"), ("A", "1")].into_iter().collect();
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"A":"1","B":"2"}"#);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!(" Production ".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(Environment::Development.to_string(), "development");
        assert!(Environment::Production.is_production());

        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ActorError::InvalidEnvironment { ref value } if value == "qa"));
    }
}
