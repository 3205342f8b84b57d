//! Environment-derived configuration, read once at startup.

use std::env;

/// Default metadata-server host on the managed platform.
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

/// Runtime configuration shared with every handler through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name substituted into the greeting.
    pub target: String,
    /// Absolute URL of the backend service. Required by `/full` only, and
    /// also the audience the identity token is scoped to.
    pub backend_url: Option<String>,
    /// Listen port.
    pub port: u16,
    /// Metadata-server host, overridable for local runs and tests.
    pub metadata_host: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// `BACKEND_URL` may be absent or empty at startup; `/full` reports the
    /// configuration error per request.
    pub fn from_env() -> Self {
        Self {
            target: env::var("TARGET").unwrap_or_else(|_| "World".to_string()),
            backend_url: env::var("BACKEND_URL").ok().filter(|url| !url.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
            metadata_host: env::var("GCE_METADATA_HOST")
                .unwrap_or_else(|_| DEFAULT_METADATA_HOST.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race a parallel test thread.
    #[test]
    fn test_from_env() {
        env::remove_var("TARGET");
        env::remove_var("BACKEND_URL");
        env::remove_var("PORT");
        env::remove_var("GCE_METADATA_HOST");

        let config = Config::from_env();
        assert_eq!(config.target, "World");
        assert_eq!(config.backend_url, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.metadata_host, DEFAULT_METADATA_HOST);

        env::set_var("TARGET", "Rust");
        env::set_var("BACKEND_URL", "http://backend:8080");
        env::set_var("PORT", "9000");
        env::set_var("GCE_METADATA_HOST", "127.0.0.1:9090");

        let config = Config::from_env();
        assert_eq!(config.target, "Rust");
        assert_eq!(config.backend_url.as_deref(), Some("http://backend:8080"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.metadata_host, "127.0.0.1:9090");

        env::remove_var("TARGET");
        env::remove_var("BACKEND_URL");
        env::remove_var("PORT");
        env::remove_var("GCE_METADATA_HOST");
    }
}
