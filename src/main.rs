// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio Ingress Service
//!
//! Fronts the portfolio site's contact form and media gallery:
//!
//! - `POST /contact/check` validates a submission and consults the per-form
//!   sliding-window rate limiter (3 submissions per 60 s by default)
//! - `GET /media/resolve` rewrites stored-file URLs to the provider's preview
//!   endpoint with display-size presets and a responsive source set
//! - `GET /metrics` exposes Prometheus counters
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `MAX_SUBMISSIONS`: Max submissions per form id per window (default: 3)
//! - `WINDOW_MS`: Rate window in milliseconds (default: 60000)
//! - `PROVIDER_HOST_TOKEN`: Hostname token of the storage provider
//!   (default: appwrite)

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_ingress::{
    config::Config,
    handlers::{contact_check, health, media_resolve, metrics, AppState},
    limiter::SubmissionLimiter,
    metrics::IngressMetrics,
    validator::SubmissionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        max_submissions = config.rate_limit.max_submissions,
        window_ms = config.rate_limit.window_ms,
        provider_host_token = %config.media.provider_host_token,
        "Starting portfolio ingress"
    );

    // Create application state
    let limiter = SubmissionLimiter::new(config.rate_limit.clone());
    let validator = SubmissionValidator::new(config.validation.clone());
    let ingress_metrics = IngressMetrics::new()?;

    let state = Arc::new(AppState {
        limiter,
        validator,
        metrics: ingress_metrics,
        config: config.clone(),
    });

    // Spawn cleanup task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    // Build router; the frontend calls from the browser, so CORS is open.
    let app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact/check", post(contact_check))
        .route("/media/resolve", get(media_resolve))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: portfolio_ingress::config::RateLimitConfig {
            max_submissions: std::env::var("MAX_SUBMISSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            window_ms: std::env::var("WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60000),
        },
        media: portfolio_ingress::config::MediaConfig {
            provider_host_token: std::env::var("PROVIDER_HOST_TOKEN")
                .unwrap_or_else(|_| "appwrite".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}
