// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the ingress service.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Counters owned by the service, registered against a private registry.
pub struct IngressMetrics {
    registry: Registry,
    /// Contact submissions that passed validation and rate limiting
    pub submissions_allowed: IntCounter,
    /// Contact submissions blocked by the rate limiter
    pub submissions_limited: IntCounter,
    /// Contact submissions rejected by validation
    pub validation_failures: IntCounter,
    /// Media URLs rewritten to the provider preview endpoint
    pub media_rewrites: IntCounter,
    /// Media URLs passed through verbatim
    pub media_passthrough: IntCounter,
}

impl IngressMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions_allowed = IntCounter::new(
            "portfolio_submissions_allowed_total",
            "Contact submissions allowed",
        )?;
        let submissions_limited = IntCounter::new(
            "portfolio_submissions_limited_total",
            "Contact submissions blocked by rate limiting",
        )?;
        let validation_failures = IntCounter::new(
            "portfolio_validation_failures_total",
            "Contact submissions rejected by validation",
        )?;
        let media_rewrites = IntCounter::new(
            "portfolio_media_rewrites_total",
            "Media URLs rewritten to the preview endpoint",
        )?;
        let media_passthrough = IntCounter::new(
            "portfolio_media_passthrough_total",
            "Media URLs passed through verbatim",
        )?;

        registry.register(Box::new(submissions_allowed.clone()))?;
        registry.register(Box::new(submissions_limited.clone()))?;
        registry.register(Box::new(validation_failures.clone()))?;
        registry.register(Box::new(media_rewrites.clone()))?;
        registry.register(Box::new(media_passthrough.clone()))?;

        Ok(Self {
            registry,
            submissions_allowed,
            submissions_limited,
            validation_failures,
            media_rewrites,
            media_passthrough,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
