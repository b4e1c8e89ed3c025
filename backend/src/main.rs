//! Main entry point for the AthletiX events backend.
//!
//! This file initializes the Axum web server, connects to MongoDB, builds
//! the Firebase token verifier, and registers all API routes and middleware.
//! It orchestrates the application's startup and graceful shutdown.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;

use crate::auth::verifier::{FirebaseTokenVerifier, SharedVerifier};
use anyhow::Result;
use axum::{Extension, Router, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let verifier: SharedVerifier = Arc::new(FirebaseTokenVerifier::new(
        config.firebase_project_id.clone(),
    ));

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/events", api::event::routes::event_router().await)
        .merge(api::booking::routes::booking_router().await)
        .merge(api::manage::routes::manage_router().await)
        .layer(CorsLayer::permissive())
        .layer(Extension(db.clone()))
        .layer(Extension(verifier));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting AthletiX server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;

    Ok(())
}

/// Plain-text liveness probe.
async fn root_handler() -> &'static str {
    "Hello runners!"
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
    }
}
