//! Router and request handlers.

use axum::{extract::State, routing::get, Json, Router};
use reqwest::Client;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::error::ChainError;

/// Shared per-service state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: Client,
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

/// Chain to the backend and fold its body into the greeting.
async fn chain(State(state): State<AppState>) -> Result<String, ChainError> {
    let url = state
        .config
        .backend_url
        .as_deref()
        .ok_or(ChainError::Configuration("BACKEND_URL"))?;

    info!("Chaining to backend: {}", url);

    let response = state
        .http_client
        .get(url)
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Response;

    fn body_with_content_type(content_type: Option<&str>, bytes: &[u8]) -> reqwest::Response {
        let mut builder = Response::builder().status(200);
        if let Some(value) = content_type {
            builder = builder.header("content-type", value);
        }
        reqwest::Response::from(builder.body(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_decode_defaults_to_utf8() {
        let response = body_with_content_type(None, "Hello from backend!\n".as_bytes());
        let text = decode_body(response).await.unwrap();
        assert_eq!(text, "Hello from backend!\n");
    }

    #[tokio::test]
    async fn test_decode_honors_declared_charset() {
        // "café" in latin-1: the 0xE9 byte is invalid UTF-8.
        let response =
            body_with_content_type(Some("text/plain; charset=iso-8859-1"), b"caf\xe9");
        let text = decode_body(response).await.unwrap();
        assert_eq!(text, "caf\u{e9}");
    }

    #[tokio::test]
    async fn test_decode_unknown_charset_falls_back_to_utf8() {
        let response = body_with_content_type(Some("text/plain; charset=bogus"), b"plain");
        let text = decode_body(response).await.unwrap();
        assert_eq!(text, "plain");
    }

    #[tokio::test]
    async fn test_decode_rejects_malformed_bytes() {
        let response = body_with_content_type(Some("text/plain; charset=utf-8"), b"\xff\xfe");
        let err = decode_body(response).await.unwrap_err();
        assert!(matches!(err, ChainError::Decode { .. }));
    }
}
