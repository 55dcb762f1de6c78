// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio Ingress
//!
//! This crate provides the ingress-level core of a personal portfolio site:
//!
//! - Per-form sliding-window rate limiting for contact submissions
//! - Contact submission validation (required fields, email shape, length caps)
//! - Provider image URL recognition and preview-endpoint rewriting with
//!   display-size presets and responsive source sets
//! - A lazy image loading state machine (visibility detection with a prefetch
//!   margin, one-shot fallback substitution on load failure)
//!
//! Storage, messaging, and rendering are external collaborators; this crate
//! only decides what may proceed and which URL an image element should fetch.

pub mod config;
pub mod handlers;
pub mod limiter;
pub mod loader;
pub mod media;
pub mod metrics;
pub mod validator;

pub use config::Config;
pub use limiter::{SubmissionLimiter, SubmissionResult};
pub use loader::{ImageProps, LazyImage, MountAction, Phase, Rect};
pub use media::DisplaySize;
pub use validator::{SubmissionValidator, ValidationResult};
