//! Main Entrypoint for the ML Concept Visualizer API
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Validating the agent chain; an invalid chain stops startup.
//! 3. Initializing the model client for the configured provider.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use mlviz_api::{
    config::Config,
    router::create_router,
    state::{AppState, build_chain, build_model_client},
};
use mlviz_core::ChainConfig;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Validating agent chain...");

    // --- 3. Validate the Agent Chain ---
    let chain = Arc::new(build_chain(
        ChainConfig::ml_explainer(),
        config.prompts_path.as_deref(),
    )?);
    info!(
        roles = chain.roles().len(),
        entry = %chain.role(chain.entry()).name,
        max_turns = chain.max_turns(),
        "Agent chain is valid."
    );

    // --- 4. Initialize the Model Client ---
    let model_client = build_model_client(&config, &chain);
    let app_state = Arc::new(AppState::new(chain, model_client, config.upstream_timeout));

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // --- 6. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
