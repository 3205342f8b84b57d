//! Environment-derived configuration, read once at startup.

use std::env;

/// Runtime configuration shared with every handler through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name substituted into the greeting.
    pub target: String,
    /// Absolute URL of the backend service. Required by `/full` only.
    pub backend_url: Option<String>,
    /// Listen port.
    pub port: u16,
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

        let config = Config::from_env();
        assert_eq!(config.target, "World");
        assert_eq!(config.backend_url, None);
        assert_eq!(config.port, 8080);

        env::set_var("TARGET", "Rust");
        env::set_var("BACKEND_URL", "http://backend:8080");
        env::set_var("PORT", "9000");

        let config = Config::from_env();
        assert_eq!(config.target, "Rust");
        assert_eq!(config.backend_url.as_deref(), Some("http://backend:8080"));
        assert_eq!(config.port, 9000);

        // An empty BACKEND_URL counts as unset.
        env::set_var("BACKEND_URL", "");
        env::set_var("PORT", "not-a-port");

        let config = Config::from_env();
        assert_eq!(config.backend_url, None);
        assert_eq!(config.port, 8080);

        env::remove_var("TARGET");
        env::remove_var("BACKEND_URL");
        env::remove_var("PORT");
    }
}
