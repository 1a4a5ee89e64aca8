//! Concurrent publishing of a whole environment

use crate::traits::{SecretStore, SecretWrite};
use futures::future::join_all;
use types::{
    utils::generate_correlation_id, Credentials, EnvironmentMap, KeyOutcome, Repository, Result,
    SyncOutcome,
};

/// Publishes every variable of an environment to a secret store
#[derive(Debug, Clone)]
pub struct SecretPublisher<S> {
    store: S,
}

impl<S: SecretStore> SecretPublisher<S> {
    /// Create a new publisher
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Publish every entry of `env`
    ///
    /// Fails only when a credential is missing, in which case nothing is
    /// sent. Otherwise all writes are started together and the outcome holds
    /// one entry per key, failures included.
    pub async fn publish(
        &self,
        repository: &Repository,
        credentials: &Credentials,
        env: &EnvironmentMap,
    ) -> Result<SyncOutcome> {
        credentials.ensure_complete()?;

        let sync_id = generate_correlation_id();
        tracing::info!(
            sync_id = %sync_id,
            store = %self.store.name(),
            repository = %repository,
            secret_count = env.len(),
            "Publishing secrets"
        );

        let writes = env.iter().map(|(key, value)| {
            self.publish_one(SecretWrite {
                repository,
                credentials,
                key,
                value,
            })
        });
        let outcome = SyncOutcome::new(join_all(writes).await);

        tracing::info!(sync_id = %sync_id, "{}", outcome.summary());
        Ok(outcome)
    }

    async fn publish_one(&self, write: SecretWrite<'_>) -> KeyOutcome {
        match self.store.put_secret(write).await {
            Ok(()) => {
                tracing::info!(key = %write.key, "✓ Synchronized secret");
                KeyOutcome::published(write.key)
            }
            Err(e) => {
                tracing::error!(key = %write.key, error = %e, "✗ Failed to synchronize secret");
                KeyOutcome::failed(write.key, e.reason())
            }
        }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
