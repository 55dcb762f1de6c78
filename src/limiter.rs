// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for contact-form submissions.
//!
//! Tracks submission timestamps per logical form id and blocks a form once it
//! has been submitted `max_submissions` times within the trailing window.
//! A blocked attempt is never recorded, so a blocked caller that retries
//! immediately stays blocked until the oldest retained timestamp ages out.

use crate::config::RateLimitConfig;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Result of a submission check.
#[derive(Debug, Clone)]
pub enum SubmissionResult {
    /// Submission is allowed and has been recorded
    Allowed {
        /// Remaining submissions in the current window
        remaining: u32,
        /// Time until the window fully resets
        reset_in: Duration,
    },
    /// Submission is blocked
    Limited {
        /// Time until the oldest retained submission ages out
        retry_after: Duration,
    },
}

impl SubmissionResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SubmissionResult::Allowed { .. })
    }
}

/// Thread-safe sliding-window limiter keyed by form id.
///
/// The backing map is an explicitly owned store rather than process-global
/// state; construct one per service instance and share it through
/// application state.
pub struct SubmissionLimiter {
    /// Configuration
    config: RateLimitConfig,
    /// Submission timestamps (milliseconds since epoch) per form id
    windows: Arc<RwLock<HashMap<String, Vec<i64>>>>,
}

impl SubmissionLimiter {
    /// Create a new limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check whether a submission for `form_id` is allowed right now.
    pub async fn check(&self, form_id: &str) -> SubmissionResult {
        self.check_at(
            form_id,
            self.config.max_submissions,
            self.config.window_ms,
            Utc::now().timestamp_millis(),
        )
        .await
    }

    /// Check with explicit limits and clock.
    ///
    /// Retains only timestamps strictly younger than the window (a timestamp
    /// exactly `window_ms` old has expired), then either records the attempt
    /// and allows it, or blocks it without recording.
    pub async fn check_at(
        &self,
        form_id: &str,
        max_submissions: u32,
        window_ms: u64,
        now_ms: i64,
    ) -> SubmissionResult {
        let window = window_ms as i64;
        let mut windows = self.windows.write().await;
        let timestamps = windows.entry(form_id.to_string()).or_default();

        timestamps.retain(|ts| now_ms - ts < window);

        if timestamps.len() >= max_submissions as usize {
            let oldest = timestamps.first().copied().unwrap_or(now_ms);
            let retry_after = Duration::from_millis((oldest + window - now_ms).max(0) as u64);
            debug!(
                form_id,
                retry_after_ms = retry_after.as_millis() as u64,
                "Submission rate limit exceeded"
            );
            return SubmissionResult::Limited { retry_after };
        }

        timestamps.push(now_ms);
        let remaining = max_submissions - timestamps.len() as u32;
        debug!(form_id, remaining, "Submission recorded");
        SubmissionResult::Allowed {
            remaining,
            reset_in: Duration::from_millis(window_ms),
        }
    }

    /// Forget all recorded submissions for `form_id`.
    ///
    /// The next check behaves as if the form had never been seen. Idempotent
    /// on an already-clear key.
    pub async fn clear(&self, form_id: &str) {
        self.windows.write().await.remove(form_id);
    }

    /// Drop windows whose every timestamp has expired (should be called periodically).
    pub async fn cleanup(&self) {
        let now_ms = Utc::now().timestamp_millis();
        let window = self.config.window_ms as i64;

        let mut windows = self.windows.write().await;
        windows.retain(|_, timestamps| {
            timestamps.retain(|ts| now_ms - ts < window);
            !timestamps.is_empty()
        });
    }

    /// Number of form ids currently holding at least one recorded timestamp.
    pub async fn tracked_forms(&self) -> usize {
        self.windows.read().await.len()
    }
}
