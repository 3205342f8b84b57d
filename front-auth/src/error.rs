//! Chain call failures and their HTTP surfacing.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

use crate::auth::AuthError;

/// Everything that can go wrong while serving `/full`.
///
/// No variant is recovered locally: each one bubbles out of the handler and
/// becomes a generic 500 response. The detail goes to the log, not the caller.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A required configuration value is absent.
    #[error("{0} is missing")]
    Configuration(&'static str),

    /// The identity token could not be minted for the backend audience.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The backend was unreachable, timed out, or answered non-2xx.
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend body is not valid under its declared charset.
    #[error("backend body is not valid {charset}")]
    Decode { charset: String },
}

impl IntoResponse for ChainError {
    fn into_response(self) -> Response {
        warn!("chain request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
