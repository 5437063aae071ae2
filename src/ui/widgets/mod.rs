// SPDX-License-Identifier: MPL-2.0
pub mod error_glyph;

pub use error_glyph::ErrorGlyph;
