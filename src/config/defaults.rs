// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Fade**: Crossfade duration bounds for image tiles
//! - **Placeholder**: Resting opacity of the placeholder layer
//! - **Loader**: Cache size and request timeout bounds

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default crossfade duration between placeholder and image (milliseconds).
pub const DEFAULT_FADE_DURATION_MS: u64 = 250;

/// Minimum crossfade duration. A fade is never instantaneous.
pub const MIN_FADE_DURATION_MS: u64 = 50;

/// Maximum crossfade duration.
pub const MAX_FADE_DURATION_MS: u64 = 5000;

// ==========================================================================
// Placeholder Defaults
// ==========================================================================

/// Resting opacity of the placeholder layer while no image is shown.
pub const DEFAULT_PLACEHOLDER_OPACITY: f32 = 0.5;

// ==========================================================================
// Loader Defaults
// ==========================================================================

/// Default number of decoded images kept in memory.
pub const DEFAULT_CACHE_MAX_IMAGES: usize = 64;

/// Minimum number of decoded images kept in memory.
pub const MIN_CACHE_MAX_IMAGES: usize = 4;

/// Maximum number of decoded images kept in memory.
pub const MAX_CACHE_MAX_IMAGES: usize = 512;

/// Default timeout for remote image requests (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Minimum timeout for remote image requests (seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum timeout for remote image requests (seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Icon theme used when none is configured, and the fallback theme for
/// icons missing from the selected one.
pub const DEFAULT_ICON_THEME: &str = "default";

const _: () = {
    assert!(MIN_FADE_DURATION_MS > 0);
    assert!(MIN_FADE_DURATION_MS <= DEFAULT_FADE_DURATION_MS);
    assert!(DEFAULT_FADE_DURATION_MS <= MAX_FADE_DURATION_MS);
    assert!(MIN_CACHE_MAX_IMAGES <= DEFAULT_CACHE_MAX_IMAGES);
    assert!(DEFAULT_CACHE_MAX_IMAGES <= MAX_CACHE_MAX_IMAGES);
    assert!(MIN_REQUEST_TIMEOUT_SECS <= DEFAULT_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
};
