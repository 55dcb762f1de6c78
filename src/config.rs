// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the portfolio ingress service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the portfolio ingress service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Submission rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Contact submission validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Media URL optimization configuration
    #[serde(default)]
    pub media: MediaConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Rate limiting configuration for contact-form submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per form id within the window (default: 3)
    #[serde(default = "default_max_submissions")]
    pub max_submissions: u32,

    /// Trailing window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Validation configuration for contact submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum accepted name length in characters (default: 100)
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum accepted email length in characters (default: 254)
    #[serde(default = "default_max_email_len")]
    pub max_email_len: usize,

    /// Maximum accepted message length in characters (default: 5000)
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

/// Media URL optimization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Hostname token identifying the storage provider (default: appwrite)
    #[serde(default = "default_provider_host_token")]
    pub provider_host_token: String,

    /// Path segment identifying a stored file URL (default: /storage/)
    #[serde(default = "default_storage_path_segment")]
    pub storage_path_segment: String,

    /// JPEG/WebP quality requested from the preview endpoint (default: 80)
    #[serde(default = "default_preview_quality")]
    pub preview_quality: u32,

    /// Image substituted when the requested source fails to load
    #[serde(default = "default_fallback_src")]
    pub fallback_src: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_submissions() -> u32 {
    3
}

fn default_window_ms() -> u64 {
    60000
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_email_len() -> usize {
    254
}

fn default_max_message_len() -> usize {
    5000
}

fn default_provider_host_token() -> String {
    "appwrite".to_string()
}

fn default_storage_path_segment() -> String {
    "/storage/".to_string()
}

fn default_preview_quality() -> u32 {
    80
}

fn default_fallback_src() -> String {
    "/images/image-fallback.svg".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            media: MediaConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_submissions: default_max_submissions(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_email_len: default_max_email_len(),
            max_message_len: default_max_message_len(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider_host_token: default_provider_host_token(),
            storage_path_segment: default_storage_path_segment(),
            preview_quality: default_preview_quality(),
            fallback_src: default_fallback_src(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
