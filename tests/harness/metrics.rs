// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome collection for flood simulation results.

use std::collections::HashMap;

/// Possible outcomes for a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    RateLimited,
    ValidationFailed,
}

/// Collects outcomes during a flood simulation.
#[derive(Debug, Default)]
pub struct FloodMetrics {
    /// Count of submissions by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Count of submissions by form id
    submissions_per_form: HashMap<String, usize>,
    /// Count of allowed submissions by form id
    allowed_per_form: HashMap<String, usize>,
}

impl FloodMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission outcome.
    pub fn record(&mut self, outcome: Outcome, form_id: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .submissions_per_form
            .entry(form_id.to_string())
            .or_insert(0) += 1;
        if outcome == Outcome::Allowed {
            *self
                .allowed_per_form
                .entry(form_id.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Get total submission count.
    pub fn total_submissions(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Get block rate (ratio of blocked to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total_submissions();
        if total == 0 {
            return 0.0;
        }
        let allowed = self.count(Outcome::Allowed);
        (total - allowed) as f64 / total as f64
    }

    /// Get number of unique form ids that submitted.
    pub fn unique_forms(&self) -> usize {
        self.submissions_per_form.len()
    }

    /// Get allowed count for one form id.
    pub fn allowed_for(&self, form_id: &str) -> usize {
        self.allowed_per_form.get(form_id).copied().unwrap_or(0)
    }

    /// Largest allowed count across all forms.
    pub fn max_allowed_per_form(&self) -> usize {
        self.allowed_per_form.values().copied().max().unwrap_or(0)
    }

    /// Generate a summary report.
    pub fn report(&self) -> FloodReport {
        FloodReport {
            total_submissions: self.total_submissions(),
            allowed: self.count(Outcome::Allowed),
            rate_limited: self.count(Outcome::RateLimited),
            validation_failed: self.count(Outcome::ValidationFailed),
            block_rate: self.block_rate(),
            unique_forms: self.unique_forms(),
            max_allowed_per_form: self.max_allowed_per_form(),
        }
    }
}

/// Summary report of a flood simulation.
#[derive(Debug, Clone)]
pub struct FloodReport {
    pub total_submissions: usize,
    pub allowed: usize,
    pub rate_limited: usize,
    pub validation_failed: usize,
    pub block_rate: f64,
    pub unique_forms: usize,
    pub max_allowed_per_form: usize,
}

impl std::fmt::Display for FloodReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Flood Simulation Report ===")?;
        writeln!(f, "Total Submissions: {}", self.total_submissions)?;
        writeln!(f, "Allowed:           {}", self.allowed)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Validation Failed: {}", self.validation_failed)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f, "Unique Forms:      {}", self.unique_forms)?;
        writeln!(f, "Max Allowed/Form:  {}", self.max_allowed_per_form)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_collection() {
        let mut metrics = FloodMetrics::new();

        metrics.record(Outcome::Allowed, "contact");
        metrics.record(Outcome::Allowed, "contact");
        metrics.record(Outcome::RateLimited, "contact");
        metrics.record(Outcome::Allowed, "guestbook");

        assert_eq!(metrics.total_submissions(), 4);
        assert_eq!(metrics.count(Outcome::Allowed), 3);
        assert_eq!(metrics.count(Outcome::RateLimited), 1);
        assert_eq!(metrics.unique_forms(), 2);
        assert_eq!(metrics.allowed_for("contact"), 2);
        assert_eq!(metrics.max_allowed_per_form(), 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = FloodMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Allowed, "contact");
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "contact");
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
