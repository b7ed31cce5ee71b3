// Main entry point for the episode server

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use episode_server::{build_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!("Scraping episodes from {}", config.source_url);

    let app = build_app(AppState {
        source: config.source_url,
    });

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen))?;
    log::info!("Listening on http://{}/episodes", config.listen);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
