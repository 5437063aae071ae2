// SPDX-License-Identifier: MPL-2.0
//! `tsubame` is an image tile component for the Iced GUI framework.
//!
//! A tile shows a translucent placeholder while its image loads, then
//! crossfades to the picture. Sources may be local paths, HTTP(S) URLs or
//! `image://provider/id` strings served by registered image providers.

#![doc(html_root_url = "https://docs.rs/tsubame/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod media;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
