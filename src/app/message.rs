// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and startup flags.

use crate::config::Config;
use crate::media::LoadContext;
use crate::ui::image_tile;
use iced::Size;
use std::time::Instant;

/// Messages handled by [`super::App::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// A message addressed to the tile at the given index.
    Tile(usize, image_tile::Message),
    /// Animation frame, only emitted while a tile is fading.
    Tick(Instant),
    /// Reload every tile, bypassing the cache.
    ReloadAll,
    /// The window was resized; the grid reflows.
    Resized(Size),
    Exit,
}

/// Runtime flags passed from the command line into the application.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Image sources, one tile each.
    pub sources: Vec<String>,
    /// Configuration loaded at startup.
    pub config: Config,
    /// Shared loading machinery: providers, cache and HTTP client.
    pub context: LoadContext,
}
