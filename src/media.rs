// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Media source resolution for gallery and blog images.
//!
//! Stored files live behind the storage provider's `view` endpoint; the
//! provider also exposes a `preview` transform endpoint that re-encodes a file
//! to a requested width/height/quality. URLs recognized as provider file URLs
//! are rewritten to `preview` with dimensions taken from a named display-size
//! preset. Third-party URLs pass through verbatim so arbitrary hosts never
//! receive transform parameters they do not understand.

use crate::config::MediaConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Named display-size presets with fixed output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySize {
    /// Grid/list thumbnails
    Thumbnail,
    /// Project and gallery cards
    #[default]
    Card,
    /// Blog post inline images
    Blog,
    /// Full-width cover images
    Hero,
    /// Lightbox / original-size viewing
    Full,
}

impl DisplaySize {
    /// Output dimensions requested from the preview endpoint, width x height.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            DisplaySize::Thumbnail => (150, 150),
            DisplaySize::Card => (400, 300),
            DisplaySize::Blog => (800, 450),
            DisplaySize::Hero => (1200, 600),
            DisplaySize::Full => (1920, 1080),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplaySize::Thumbnail => "thumbnail",
            DisplaySize::Card => "card",
            DisplaySize::Blog => "blog",
            DisplaySize::Hero => "hero",
            DisplaySize::Full => "full",
        }
    }
}

/// Candidate widths offered in responsive source sets.
pub const SRCSET_WIDTHS: [u32; 5] = [320, 640, 768, 1024, 1280];

/// Check whether a URL belongs to the storage provider.
///
/// Recognition is by hostname token plus storage path segment; anything else
/// (including unparseable input) is treated as not optimizable.
pub fn is_provider_url(src: &str, config: &MediaConfig) -> bool {
    match Url::parse(src) {
        Ok(url) => {
            url.host_str()
                .is_some_and(|host| host.contains(&config.provider_host_token))
                && url.path().contains(&config.storage_path_segment)
        }
        Err(_) => false,
    }
}

/// Rewrite a provider file URL to its preview endpoint.
///
/// The trailing file operation segment (`view`, `download`, or an existing
/// `preview`) becomes `preview`; transform parameters are replaced while other
/// query parameters (notably `project`) are preserved. Returns `None` for
/// URLs that are not provider file URLs.
fn preview_url(
    src: &str,
    width: Option<u32>,
    height: Option<u32>,
    quality: u32,
    config: &MediaConfig,
) -> Option<String> {
    if !is_provider_url(src, config) {
        return None;
    }

    let mut url = Url::parse(src).ok()?;

    let mut segments: Vec<String> = url.path_segments()?.map(str::to_string).collect();
    match segments.last().map(String::as_str) {
        Some("view") | Some("download") | Some("preview") => {
            *segments.last_mut()? = "preview".to_string();
        }
        _ => segments.push("preview".to_string()),
    }
    url.set_path(&segments.join("/"));

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "width" && key != "height" && key != "quality")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if let Some(width) = width {
            pairs.append_pair("width", &width.to_string());
        }
        if let Some(height) = height {
            pairs.append_pair("height", &height.to_string());
        }
        pairs.append_pair("quality", &quality.to_string());
    }

    Some(url.to_string())
}

/// Resolve the URL actually assigned to an image element.
///
/// Provider file URLs are rewritten to the preview endpoint using the preset
/// dimensions; everything else is returned unchanged.
pub fn resolve_source(
    src: &str,
    size: DisplaySize,
    disable_optimization: bool,
    config: &MediaConfig,
) -> String {
    if disable_optimization {
        return src.to_string();
    }
    let (width, height) = size.dimensions();
    preview_url(src, Some(width), Some(height), config.preview_quality, config)
        .unwrap_or_else(|| src.to_string())
}

/// Build a responsive source-set descriptor for a provider file URL.
///
/// One preview rewrite per candidate width (width and quality only, so the
/// provider preserves aspect ratio), joined as `"<url> <w>w, ..."`. URLs that
/// are not provider file URLs produce an empty descriptor: no responsive
/// variants are offered for third-party hosts.
pub fn build_srcset(src: &str, config: &MediaConfig) -> String {
    SRCSET_WIDTHS
        .iter()
        .filter_map(|&width| {
            preview_url(src, Some(width), None, config.preview_quality, config)
                .map(|url| format!("{url} {width}w"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
