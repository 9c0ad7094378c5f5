use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use roulette_server::{AppState, Matchmaker, ServerConfig, SignalingService, ws_handler};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "Starting roulette signaling server");

    let signaling = SignalingService::new();
    let (command_tx, command_rx) = mpsc::channel(256);

    let matchmaker = Matchmaker::new(
        config.matchmaker.clone(),
        command_rx,
        Arc::new(signaling.clone()),
    );
    tokio::spawn(matchmaker.run());

    let state = Arc::new(AppState {
        signaling,
        commands: command_tx,
    });

    let cors = match &config.client_url {
        Some(origin) => CorsLayer::new().allow_origin(
            origin
                .parse::<HeaderValue>()
                .context("CLIENT_URL is not a valid origin")?,
        ),
        None => CorsLayer::new().allow_origin(Any),
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Signaling server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
