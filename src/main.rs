// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nursery Locator API Server
//!
//! Serves the nursery map for Khariar: nursery markers, the block boundary,
//! and the line from a user's address to the nearest nursery.

use anyhow::Context;
use nursery_locator::{
    config::Config,
    services::{DataSource, GeocoderService, SessionData},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Nursery Locator API");

    // Datasets are fetched once per process and shared by every request
    let session = SessionData::new(
        reqwest::Client::new(),
        DataSource::parse(&config.data_source),
        DataSource::parse(&config.boundary_source),
    );
    session.warm().await;

    let geocoder = GeocoderService::new(
        &config.geocoder_url,
        &config.geocoder_user_agent,
        config.geocoder_timeout,
    )
    .context("Failed to initialize geocoder")?;
    tracing::info!(
        url = %config.geocoder_url,
        locality = %config.geocode_hint.locality,
        "Geocoder initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        session,
        geocoder,
    });

    // Build router
    let app = nursery_locator::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nursery_locator=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
