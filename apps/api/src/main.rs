mod coach;
mod config;
mod errors;
mod inference_client;
mod models;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::coach::mock::MockResponder;
use crate::coach::orchestrator::Orchestrator;
use crate::config::Config;
use crate::inference_client::InferenceClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Coach API v{}", env!("CARGO_PKG_VERSION"));

    if config.model_override_ignored() {
        warn!(
            "AI_MODEL '{}' is not a registered model, using '{}'",
            config.model_override.as_deref().unwrap_or_default(),
            config.model.identifier
        );
    }
    info!(
        "Using AI model: {} ({}, max length {}, temperature {})",
        config.model.identifier,
        config.model.description,
        config.model.max_length,
        config.model.temperature
    );

    // Scratch space for uploaded resumes
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("cannot create upload dir {}", config.upload_dir.display()))?;

    // Initialize inference client and responder chain
    let client = InferenceClient::new(config.huggingface_api_key.clone())?;
    let orchestrator = Orchestrator::for_model(
        client,
        config.model,
        Arc::new(MockResponder::from_entropy()),
    );
    info!(
        "Responder chain: {} -> mock",
        orchestrator.responder_names().join(" -> ")
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        orchestrator: Arc::new(orchestrator),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
