//! Router and request handlers.

use axum::{extract::State, routing::get, Json, Router};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::error::ChainError;

/// Shared per-service state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: Client,
    pub token_provider: Arc<dyn TokenProvider>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/full", get(chain))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello(State(state): State<AppState>) -> String {
    format!("Hello from frontend {}\n", state.config.target)
}

/// Chain to the backend with a bearer identity token and fold its body into
/// the greeting.
///
/// The token is minted fresh per request, scoped to the backend URL as
/// audience. A mismatched audience is rejected by the backend, not here.
async fn chain(State(state): State<AppState>) -> Result<String, ChainError> {
    let url = state
        .config
        .backend_url
        .as_deref()
        .ok_or(ChainError::Configuration("BACKEND_URL"))?;

    let id_token = state.token_provider.identity_token(url).await?;

    info!("Chaining to backend: {}", url);

    let response = state
        .http_client
        .get(url)
        .header("Authorization", format!("Bearer {}", id_token))
        .send()
        .await?
        .error_for_status()?;

    let backend_data = decode_body(response).await?;

    Ok(format!(
        "Hello from frontend {} and... {}",
        state.config.target, backend_data
    ))
}

/// Decode the body under the charset declared in the Content-Type header,
/// defaulting to UTF-8. Malformed bytes are an error, not replacement
/// characters.
async fn decode_body(response: reqwest::Response) -> Result<String, ChainError> {
    let charset = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .and_then(|mime| mime.get_param("charset").map(|c| c.as_str().to_string()))
        .unwrap_or_else(|| "utf-8".to_string());

    let encoding =
        encoding_rs::Encoding::for_label(charset.as_bytes()).unwrap_or(encoding_rs::UTF_8);

    let bytes = response.bytes().await?;
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ChainError::Decode { charset });
    }
    Ok(text.into_owned())
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
