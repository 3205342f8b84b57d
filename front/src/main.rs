//! Chain demo frontend (plain variant).
//!
//! Serves a greeting on `/` and chains to the configured backend on `/full`
//! with a bare, unauthenticated HTTP request.

use anyhow::Result;
use reqwest::Client;
use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chain_front::config::Config;
use chain_front::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .json()
        .init();

    info!("Starting chain frontend");

    let config = Config::from_env();

    let http_client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        config,
        http_client,
    };

    info!("Frontend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
