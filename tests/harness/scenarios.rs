// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Flood scenario patterns for throttling tests.

/// Flood scenario configuration.
///
/// Submissions are replayed against the limiter on a virtual clock, so
/// scenarios are deterministic regardless of test-runner speed.
#[derive(Debug, Clone)]
pub struct FloodConfig {
    /// Total number of submissions to send
    pub total_submissions: usize,
    /// Virtual milliseconds between consecutive submissions
    pub interval_ms: u64,
    /// Number of unique form ids cycled through
    pub unique_forms: usize,
    /// Whether payloads pass validation
    pub valid_payload: bool,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            total_submissions: 20,
            interval_ms: 1000,
            unique_forms: 1,
            valid_payload: true,
        }
    }
}

/// Predefined flood patterns.
impl FloodConfig {
    /// Rapid-fire submissions to a single form, all inside one window.
    pub fn single_form_flood() -> Self {
        Self {
            total_submissions: 20,
            interval_ms: 100,
            unique_forms: 1,
            ..Default::default()
        }
    }

    /// Submissions spread across many forms; each form stays under its limit.
    pub fn form_spread() -> Self {
        Self {
            total_submissions: 30,
            interval_ms: 100,
            unique_forms: 10,
            ..Default::default()
        }
    }

    /// Invalid payloads; none should ever reach the limiter.
    pub fn invalid_payload_flood() -> Self {
        Self {
            total_submissions: 20,
            interval_ms: 100,
            unique_forms: 5,
            valid_payload: false,
        }
    }

    /// Slow drip that stays under the rate: one submission per 20 s against a
    /// 3-per-60 s window never accumulates three live timestamps.
    pub fn slow_drip() -> Self {
        Self {
            total_submissions: 10,
            interval_ms: 20000,
            unique_forms: 1,
            ..Default::default()
        }
    }

    /// Virtual duration covered by the scenario.
    pub fn virtual_duration_ms(&self) -> u64 {
        self.total_submissions as u64 * self.interval_ms
    }
}

/// Expected outcomes for a flood pattern.
pub struct FloodExpectations {
    /// Maximum number of submissions that may be allowed
    pub max_allowed: usize,
    /// Description of expected behavior
    pub description: &'static str,
}

impl FloodConfig {
    /// Get expected outcomes for this pattern, given the limiter settings.
    pub fn expectations(&self, max_submissions: u32, window_ms: u64) -> FloodExpectations {
        if !self.valid_payload {
            return FloodExpectations {
                max_allowed: 0,
                description: "All submissions should fail validation",
            };
        }

        let windows_covered = self.virtual_duration_ms() / window_ms + 1;
        let per_form_cap = windows_covered as usize * max_submissions as usize;

        FloodExpectations {
            max_allowed: per_form_cap * self.unique_forms,
            description: "Each form is capped per sliding window",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_form_flood_expectations() {
        let config = FloodConfig::single_form_flood();
        // 20 submissions over 2 virtual seconds: one window, one form.
        let expectations = config.expectations(3, 60000);
        assert_eq!(expectations.max_allowed, 3);
    }

    #[test]
    fn test_invalid_payloads_never_allowed() {
        let config = FloodConfig::invalid_payload_flood();
        assert_eq!(config.expectations(3, 60000).max_allowed, 0);
    }
}
