//! Chain demo frontend (authenticated variant).
//!
//! Serves a greeting on `/` and chains to the configured backend on `/full`,
//! attaching an identity token minted from ambient platform credentials.

use anyhow::Result;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chain_front_auth::auth::MetadataTokenProvider;
use chain_front_auth::config::Config;
use chain_front_auth::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .json()
        .init();

    info!("Starting chain frontend (authenticated)");

    let config = Config::from_env();

    let http_client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let token_provider = Arc::new(MetadataTokenProvider::new(
        http_client.clone(),
        config.metadata_host.clone(),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        config,
        http_client,
        token_provider,
    };

    info!("Frontend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
