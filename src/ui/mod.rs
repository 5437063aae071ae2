// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`image_tile`] - Placeholder/image crossfade tile
//! - [`fade`] - Animated opacity values used by tiles
//! - [`widgets`] - Custom canvas widgets
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod fade;
pub mod image_tile;
pub mod widgets;
