// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact submission validator.
//!
//! Implements ingress-level validation for contact-form submissions:
//! - Form id presence
//! - Required field presence (name, email, message)
//! - Field length caps
//! - Email shape validation
//! - Control character rejection

use crate::config::ValidationConfig;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} exceeds {max} characters (got {actual})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("Field {field} contains control characters")]
    ControlCharacters { field: &'static str },
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Submission is valid
    Valid,
    /// Submission is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Contact submission validator.
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate the logical form identifier.
    pub fn validate_form_id(&self, form_id: &str) -> ValidationResult {
        if form_id.trim().is_empty() {
            debug!("Missing form id");
            return ValidationResult::Invalid(ValidationError::MissingField("form_id"));
        }
        ValidationResult::Valid
    }

    /// Validate the sender email address.
    ///
    /// A plausible shape is enough at this layer: a single `@`, a non-empty
    /// local part, and a domain containing a dot. Deliverability is the
    /// messaging collaborator's problem.
    pub fn validate_email(&self, email: &str) -> ValidationResult {
        let email = email.trim();
        if email.is_empty() {
            debug!("Missing email");
            return ValidationResult::Invalid(ValidationError::MissingField("email"));
        }
        if email.chars().count() > self.config.max_email_len {
            return ValidationResult::Invalid(ValidationError::FieldTooLong {
                field: "email",
                max: self.config.max_email_len,
                actual: email.chars().count(),
            });
        }
        if !is_plausible_email(email) {
            debug!(email = %email, "Invalid email shape");
            return ValidationResult::Invalid(ValidationError::InvalidEmail {
                email: email.to_string(),
            });
        }
        ValidationResult::Valid
    }

    /// Validate a complete contact submission.
    pub fn validate(
        &self,
        form_id: &str,
        name: &str,
        email: &str,
        message: &str,
    ) -> ValidationResult {
        let form_id_result = self.validate_form_id(form_id);
        if !form_id_result.is_valid() {
            return form_id_result;
        }

        let name = name.trim();
        if name.is_empty() {
            debug!("Missing name");
            return ValidationResult::Invalid(ValidationError::MissingField("name"));
        }
        if name.chars().count() > self.config.max_name_len {
            return ValidationResult::Invalid(ValidationError::FieldTooLong {
                field: "name",
                max: self.config.max_name_len,
                actual: name.chars().count(),
            });
        }
        if has_forbidden_control(name, false) {
            debug!("Control characters in name");
            return ValidationResult::Invalid(ValidationError::ControlCharacters { field: "name" });
        }

        let email_result = self.validate_email(email);
        if !email_result.is_valid() {
            return email_result;
        }

        let message = message.trim();
        if message.is_empty() {
            debug!("Missing message");
            return ValidationResult::Invalid(ValidationError::MissingField("message"));
        }
        if message.chars().count() > self.config.max_message_len {
            return ValidationResult::Invalid(ValidationError::FieldTooLong {
                field: "message",
                max: self.config.max_message_len,
                actual: message.chars().count(),
            });
        }
        if has_forbidden_control(message, true) {
            debug!("Control characters in message");
            return ValidationResult::Invalid(ValidationError::ControlCharacters {
                field: "message",
            });
        }

        debug!(form_id, "Submission valid");
        ValidationResult::Valid
    }
}

/// Check a field for control characters.
///
/// Newlines and tabs are legitimate in multi-line fields; everything else in
/// the C0/C1 ranges is rejected rather than silently stripped.
fn has_forbidden_control(text: &str, allow_newlines: bool) -> bool {
    text.chars().any(|c| {
        if allow_newlines && matches!(c, '\n' | '\r' | '\t') {
            return false;
        }
        c.is_control()
    })
}

/// Check whether an email address has a plausible shape.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
