// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lazy image loading state machine.
//!
//! Models the lifecycle of one rendered image: visibility detection with a
//! prefetch margin, deferred source assignment, and a one-shot fallback swap
//! on load failure. The rendering runtime owns the element and the visibility
//! watcher; it drives this state machine through `mount` and the `on_*`
//! callbacks and applies the returned directives. For a single instance the
//! runtime delivers callbacks serially, so transitions never race.

use crate::config::MediaConfig;
use crate::media::{self, DisplaySize};

/// Distance ahead of the viewport at which loading starts, in CSS pixels.
pub const PREFETCH_MARGIN_PX: f64 = 200.0;

/// Minimal visibility ratio the watcher triggers at.
pub const VISIBILITY_THRESHOLD: f64 = 0.01;

/// Duration of the placeholder/image cross-fade, in milliseconds.
pub const FADE_DURATION_MS: u64 = 700;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Expand by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Inputs for one rendered image instance.
#[derive(Debug, Clone)]
pub struct ImageProps {
    /// Requested source URL
    pub src: String,
    /// Alternative text
    pub alt: String,
    /// Substitute source on load failure; the configured default applies when absent
    pub fallback_src: Option<String>,
    /// Display-size preset driving the preview rewrite
    pub display_size: DisplaySize,
    /// Use the source URL verbatim
    pub disable_optimization: bool,
}

impl ImageProps {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            fallback_src: None,
            display_size: DisplaySize::default(),
            disable_optimization: false,
        }
    }
}

/// Lifecycle phase of an image instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted, not yet near the viewport
    Unobserved,
    /// Near the viewport; the resolved source is assigned and fetching
    InView,
    /// The assigned source loaded; the placeholder fades out
    Loaded,
    /// The assigned source failed; the fallback (if any) is loading
    Errored,
}

/// What the runtime must do after `mount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MountAction {
    /// Already near the viewport: the source was assigned synchronously and no
    /// watcher is needed
    AssignSource,
    /// Register a one-shot visibility watcher
    Watch { margin_px: f64, threshold: f64 },
}

/// State machine for a single rendered image.
pub struct LazyImage {
    props: ImageProps,
    phase: Phase,
    has_error: bool,
    watching: bool,
    current_src: Option<String>,
    srcset: String,
}

impl LazyImage {
    /// Mount an instance given its bounding box and the current viewport.
    ///
    /// An element already within the prefetch margin skips the watcher and has
    /// its source assigned synchronously, so above-the-fold images never show
    /// a frame of unloaded placeholder waiting for the first observation.
    pub fn mount(
        props: ImageProps,
        bounds: Rect,
        viewport: Rect,
        config: &MediaConfig,
    ) -> (Self, MountAction) {
        let mut image = Self {
            props,
            phase: Phase::Unobserved,
            has_error: false,
            watching: false,
            current_src: None,
            srcset: String::new(),
        };

        if viewport.inflate(PREFETCH_MARGIN_PX).intersects(&bounds) {
            image.enter_view(config);
            (image, MountAction::AssignSource)
        } else {
            image.watching = true;
            (
                image,
                MountAction::Watch {
                    margin_px: PREFETCH_MARGIN_PX,
                    threshold: VISIBILITY_THRESHOLD,
                },
            )
        }
    }

    fn enter_view(&mut self, config: &MediaConfig) {
        self.phase = Phase::InView;
        self.assign_source(config);
    }

    fn assign_source(&mut self, config: &MediaConfig) {
        self.current_src = Some(media::resolve_source(
            &self.props.src,
            self.props.display_size,
            self.props.disable_optimization,
            config,
        ));
        self.srcset = if self.props.disable_optimization {
            String::new()
        } else {
            media::build_srcset(&self.props.src, config)
        };
    }

    /// The visibility watcher fired.
    ///
    /// The watcher is one-shot: the runtime must disconnect it as part of this
    /// transition, and `is_watching` reflects that here.
    pub fn on_intersection(&mut self, config: &MediaConfig) {
        if self.phase != Phase::Unobserved {
            return;
        }
        self.watching = false;
        self.enter_view(config);
    }

    /// The current source finished loading.
    pub fn on_load(&mut self) {
        if matches!(self.phase, Phase::InView | Phase::Errored) {
            self.phase = Phase::Loaded;
        }
    }

    /// The current source failed to load.
    ///
    /// The first failure swaps the source to the fallback, which re-enters
    /// loading. A failure of the fallback itself is accepted as-is: the swap
    /// happens at most once per instance, so there is no substitution loop.
    /// Returns whether a swap happened.
    pub fn on_error(&mut self, config: &MediaConfig) -> bool {
        if self.phase == Phase::Unobserved || self.phase == Phase::Loaded {
            return false;
        }
        self.phase = Phase::Errored;
        if self.has_error {
            return false;
        }
        self.has_error = true;

        let fallback = self
            .props
            .fallback_src
            .clone()
            .unwrap_or_else(|| config.fallback_src.clone());
        self.current_src = Some(fallback);
        true
    }

    /// Replace the requested source (parent re-render with a new `src`).
    ///
    /// Resets the loaded/errored flags and recomputes the current source when
    /// the instance is already past visibility detection; it never re-runs the
    /// visibility check.
    pub fn set_source(&mut self, src: impl Into<String>, config: &MediaConfig) {
        self.props.src = src.into();
        self.has_error = false;
        if self.phase != Phase::Unobserved {
            self.phase = Phase::InView;
            self.assign_source(config);
        }
    }

    /// Component teardown: drop a still-registered watcher.
    pub fn unmount(&mut self) {
        self.watching = false;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The URL currently assigned to the element, once visible.
    pub fn current_src(&self) -> Option<&str> {
        self.current_src.as_deref()
    }

    /// Responsive source-set descriptor; empty until visible and for
    /// non-provider sources.
    pub fn srcset(&self) -> &str {
        &self.srcset
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn props(&self) -> &ImageProps {
        &self.props
    }
}
