//! GitHub Actions secrets client implementation

use crate::traits::{SecretStore, SecretWrite};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use types::{ActorError, PublishError, Result};

/// Request body of a secret write
#[derive(Debug, Serialize)]
struct SecretPayload<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

/// HTTP client for the GitHub Actions secrets API
#[derive(Debug, Clone)]
pub struct GithubSecretStore {
    api_url: String,
    request_timeout: Option<Duration>,
    http_client: Client,
}

impl GithubSecretStore {
    /// Create a new store client
    pub fn new(api_url: impl Into<String>, request_timeout: Option<Duration>) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("actor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ActorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            http_client,
        })
    }

    /// Endpoint of one secret
    pub fn secret_url(&self, write: &SecretWrite<'_>) -> String {
        format!(
            "{}/repos/{}/{}/actions/secrets/{}",
            self.api_url, write.repository.owner, write.repository.name, write.key
        )
    }

    async fn send(&self, write: &SecretWrite<'_>) -> std::result::Result<reqwest::Response, PublishError> {
        let request = self
            .http_client
            .put(self.secret_url(write))
            .bearer_auth(&write.credentials.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .json(&SecretPayload {
                encrypted_value: write.value,
                key_id: &write.credentials.key_id,
            })
            .send();

        let transport_error = |e: reqwest::Error| PublishError::Transport {
            key: write.key.to_string(),
            message: e.to_string(),
        };

        match self.request_timeout {
            Some(limit) => timeout(limit, request)
                .await
                .map_err(|_| PublishError::Timeout {
                    key: write.key.to_string(),
                })?
                .map_err(transport_error),
            None => request.await.map_err(transport_error),
        }
    }
}

#[async_trait]
impl SecretStore for GithubSecretStore {
    async fn put_secret(&self, write: SecretWrite<'_>) -> std::result::Result<(), PublishError> {
        tracing::debug!(key = %write.key, repository = %write.repository, "Writing secret");

        let response = self.send(&write).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let raw_text = response.text().await.unwrap_or_default();
        Err(PublishError::HttpError {
            key: write.key.to_string(),
            status: status.as_u16(),
            body: error_message(&raw_text),
        })
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Extract the API error message, falling back to the raw body
fn error_message(raw_text: &str) -> String {
    serde_json::from_str::<Value>(raw_text)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| raw_text.trim().to_string())
}
