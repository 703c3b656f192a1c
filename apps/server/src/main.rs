mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use nowplaying_core::{CoverResolver, NowPlayingResolver};
use nowplaying_cover_art::LastFmClient;
use nowplaying_media_session::PlayerctlSession;
use nowplaying_web::{AppState, WebServer};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nowplaying=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting nowplaying");

    let session = PlayerctlSession::new()
        .with_program(config.playerctl.clone())
        .with_preferences(config.preferences());

    let lastfm = LastFmClient::new(config.lastfm_api_key())?.with_endpoint(config.lastfm_endpoint.clone());
    if lastfm.is_enabled() {
        tracing::info!("Last.fm cover lookup enabled");
    } else {
        tracing::info!("No Last.fm API key configured, remote cover lookup disabled");
    }

    let resolver = NowPlayingResolver::new(Arc::new(session), CoverResolver::new(Arc::new(lastfm)));
    tracing::info!("Static files from: {}", config.static_dir.display());
    let state = AppState::new(resolver, config.static_dir.clone());

    let mut server = WebServer::new(config.bind, state);
    server.start().await?;

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    server.stop().await;

    Ok(())
}
