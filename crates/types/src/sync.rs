//! Secret synchronization types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ActorError, Result};

/// Target repository of a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Credentials required to write secrets
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer token for the secret store API
    pub token: String,
    /// Identifier of the public key the values were encrypted with
    pub key_id: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, key_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            key_id: key_id.into(),
        }
    }

    /// Fail with the first credential that is empty
    pub fn ensure_complete(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ActorError::MissingCredential {
                name: "GITHUB_TOKEN".to_string(),
            });
        }
        if self.key_id.trim().is_empty() {
            return Err(ActorError::MissingCredential {
                name: "ENCRYPTION_KEY_ID".to_string(),
            });
        }
        Ok(())
    }
}

// Never print the token
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("key_id", &self.key_id)
            .finish()
    }
}

/// Result of publishing one secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum KeyStatus {
    /// Secret was written
    Published,
    /// Secret was not written
    Failed { reason: String },
}

/// Per-key entry of a [`SyncOutcome`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOutcome {
    pub key: String,
    #[serde(flatten)]
    pub status: KeyStatus,
}

impl KeyOutcome {
    pub fn published(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: KeyStatus::Published,
        }
    }

    pub fn failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: KeyStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self.status, KeyStatus::Published)
    }
}

/// Aggregate record of one sync run, one entry per input key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub results: Vec<KeyOutcome>,
}

impl SyncOutcome {
    pub fn new(results: Vec<KeyOutcome>) -> Self {
        Self { results }
    }

    /// Number of keys in the run
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Keys that were written
    pub fn published(&self) -> impl Iterator<Item = &KeyOutcome> {
        self.results.iter().filter(|r| r.is_published())
    }

    /// Keys that failed, with their reasons
    pub fn failures(&self) -> impl Iterator<Item = &KeyOutcome> {
        self.results.iter().filter(|r| !r.is_published())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Whether every key was published
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Outcome for a single key
    pub fn get(&self, key: &str) -> Option<&KeyOutcome> {
        self.results.iter().find(|r| r.key == key)
    }

    pub fn summary(&self) -> String {
        format!(
            "Sync: {} published, {} failed",
            self.published().count(),
            self.failure_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_counts() {
        let outcome = SyncOutcome::new(vec![
            KeyOutcome::published("A"),
            KeyOutcome::failed("B", "HTTP 500"),
            KeyOutcome::published("C"),
        ]);

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.failure_count(), 1);
        assert!(!outcome.is_success());
        assert_eq!(outcome.failures().next().unwrap().key, "B");
        assert_eq!(outcome.summary(), "Sync: 2 published, 1 failed");
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let creds = Credentials::new("ghp_supersecret", "key-1");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("ghp_supersecret"));
        assert!(debug.contains("key-1"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("t", "k").ensure_complete().is_ok());
        assert!(matches!(
            Credentials::new("", "k").ensure_complete(),
            Err(ActorError::MissingCredential { ref name }) if name == "GITHUB_TOKEN"
        ));
        assert!(matches!(
            Credentials::new("t", " ").ensure_complete(),
            Err(ActorError::MissingCredential { ref name }) if name == "ENCRYPTION_KEY_ID"
        ));
    }

    #[test]
    fn test_key_outcome_serialization() {
        let json = serde_json::to_value(KeyOutcome::failed("B", "HTTP 500")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key": "B", "status": "failed", "reason": "HTTP 500" })
        );
    }
}
