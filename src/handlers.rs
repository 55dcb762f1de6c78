// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the portfolio ingress service.
//!
//! The service sits in front of the portfolio's contact form and media
//! gallery: the frontend asks it whether a submission may proceed, and asks it
//! to resolve optimized delivery URLs for stored images.

use crate::config::Config;
use crate::limiter::{SubmissionLimiter, SubmissionResult};
use crate::media::{self, DisplaySize};
use crate::metrics::IngressMetrics;
use crate::validator::{SubmissionValidator, ValidationResult};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared application state.
pub struct AppState {
    pub limiter: SubmissionLimiter,
    pub validator: SubmissionValidator,
    pub metrics: IngressMetrics,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Contact submission check request.
#[derive(Debug, Deserialize)]
pub struct ContactCheckRequest {
    pub form_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact submission check response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
}

/// Media resolve request parameters.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Source URL to resolve
    pub src: String,
    /// Display-size preset (default: card)
    #[serde(default)]
    pub size: DisplaySize,
    /// Pass the URL through untouched
    #[serde(default)]
    pub raw: bool,
}

/// Media resolve response.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub src: String,
    pub srcset: String,
    pub optimized: bool,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "portfolio-ingress",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Check validation and rate limit for a contact submission.
///
/// The frontend calls this before dispatching the message to the messaging
/// collaborator; a denial is a policy decision, so the response is 200 OK
/// with the verdict in the body.
pub async fn contact_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactCheckRequest>,
) -> (StatusCode, Json<CheckResponse>) {
    debug!(form_id = %req.form_id, "Processing submission check");

    let validation = state
        .validator
        .validate(&req.form_id, &req.name, &req.email, &req.message);

    if let ValidationResult::Invalid(err) = validation {
        state.metrics.validation_failures.inc();
        info!(form_id = %req.form_id, error = %err, "Validation failed");
        return (
            StatusCode::OK,
            Json(CheckResponse {
                allowed: false,
                reason: Some(err.to_string()),
                retry_after_secs: None,
                remaining: None,
            }),
        );
    }

    match state.limiter.check(&req.form_id).await {
        SubmissionResult::Allowed { remaining, .. } => {
            state.metrics.submissions_allowed.inc();
            debug!(form_id = %req.form_id, remaining, "Submission allowed");
            (
                StatusCode::OK,
                Json(CheckResponse {
                    allowed: true,
                    reason: None,
                    retry_after_secs: None,
                    remaining: Some(remaining),
                }),
            )
        }
        SubmissionResult::Limited { retry_after } => {
            state.metrics.submissions_limited.inc();
            info!(
                form_id = %req.form_id,
                retry_after_secs = retry_after.as_secs(),
                "Submission rate limited"
            );
            (
                StatusCode::OK,
                Json(CheckResponse {
                    allowed: false,
                    reason: Some("Submission rate limit exceeded".to_string()),
                    retry_after_secs: Some(retry_after.as_secs()),
                    remaining: None,
                }),
            )
        }
    }
}

/// Resolve an image source to its optimized delivery URL and source set.
pub async fn media_resolve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let optimized = !query.raw && media::is_provider_url(&query.src, &state.config.media);
    let src = media::resolve_source(&query.src, query.size, query.raw, &state.config.media);
    let srcset = if query.raw {
        String::new()
    } else {
        media::build_srcset(&query.src, &state.config.media)
    };

    if optimized {
        state.metrics.media_rewrites.inc();
    } else {
        state.metrics.media_passthrough.inc();
    }
    debug!(
        size = query.size.as_str(),
        optimized,
        "Resolved media source"
    );

    Json(ResolveResponse {
        src,
        srcset,
        optimized,
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    if !state.config.metrics.enabled {
        return StatusCode::NOT_FOUND.into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
        .into_response()
}
