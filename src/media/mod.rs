// SPDX-License-Identifier: MPL-2.0
//! Image loading for tiles: source parsing, providers, fetching, decoding and
//! caching.
//!
//! The pieces fit together in [`loader`], which is the only module the UI
//! talks to.

pub mod cache;
pub mod fetch;
pub mod image;
pub mod loader;
pub mod provider;
pub mod source;

pub use cache::{ImageCache, SharedImageCache};
pub use image::ImageData;
pub use loader::{LoadContext, Loader, Status};
pub use provider::{IconProvider, ImageProvider, ProviderRegistry};
pub use source::ImageSource;
