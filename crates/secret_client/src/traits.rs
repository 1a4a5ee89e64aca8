//! Secret store traits and interfaces

use async_trait::async_trait;
use types::{Credentials, PublishError, Repository};

/// A single secret write
#[derive(Debug, Clone, Copy)]
pub struct SecretWrite<'a> {
    /// Repository owning the secret
    pub repository: &'a Repository,
    /// Token and key id used for the write
    pub credentials: &'a Credentials,
    /// Secret name
    pub key: &'a str,
    /// Already encrypted value, passed through untouched
    pub value: &'a str,
}

/// Trait for remote secret stores
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Create or update one secret
    async fn put_secret(&self, write: SecretWrite<'_>) -> Result<(), PublishError>;

    /// Get the name of the store
    fn name(&self) -> &str;
}
