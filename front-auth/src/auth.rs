//! Identity-token acquisition from ambient platform credentials.
//!
//! The running service account's identity is asserted by the platform
//! metadata server; this module exchanges it for a signed identity token
//! scoped to the backend audience. No key material is read or stored.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Token exchange failures. Surfaced to `/full` as a generic server error;
/// there is no fallback to an unauthenticated call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The metadata server could not be reached: ambient credentials are
    /// unavailable in this environment.
    #[error("metadata server request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token exchange was rejected, e.g. the audience is invalid or the
    /// identity lacks permission.
    #[error("token exchange rejected with status {0}")]
    Rejected(StatusCode),

    /// The metadata server answered 200 with no token.
    #[error("metadata server returned an empty token")]
    EmptyToken,
}

/// Capability to mint a short-lived bearer token for a downstream audience.
///
/// Injected into the handlers so tests can substitute a fake provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn identity_token(&self, audience: &str) -> Result<String, AuthError>;
}

/// Production provider backed by the platform metadata server.
///
/// Tokens are minted fresh on every call; the audience is fixed per
/// deployment so callers could cache, but this provider does not.
pub struct MetadataTokenProvider {
    http_client: Client,
    metadata_host: String,
}

impl MetadataTokenProvider {
    pub fn new(http_client: Client, metadata_host: impl Into<String>) -> Self {
        Self {
            http_client,
            metadata_host: metadata_host.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for MetadataTokenProvider {
    async fn identity_token(&self, audience: &str) -> Result<String, AuthError> {
        let url = format!(
            "http://{}/computeMetadata/v1/instance/service-accounts/default/identity",
            self.metadata_host
        );

        debug!("Minting identity token for audience: {}", audience);

        let response = self
            .http_client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .query(&[("audience", audience), ("format", "full")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(response.status()));
        }

        let token = response.text().await?;
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        Ok(token)
    }
}
