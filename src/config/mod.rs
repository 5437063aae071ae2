// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[tile]` - Crossfade and placeholder appearance of image tiles
//! - `[loader]` - Image loading: decode mode, cache size, timeouts, icon theme
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `TSUBAME_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use tsubame::config;
//!
//! let (mut config, _warning) = config::load();
//! config.tile.show_error_indicator = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::fade::{Easing, FadeDuration};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Image tile appearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileConfig {
    /// Crossfade duration in milliseconds.
    #[serde(
        default = "default_fade_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub fade_duration_ms: Option<u64>,

    /// Resting opacity of the placeholder layer (0.0 to 1.0).
    #[serde(
        default = "default_placeholder_opacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder_opacity: Option<f32>,

    /// Easing curve applied to the crossfade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,

    /// Draw an error glyph over tiles whose image failed to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_error_indicator: Option<bool>,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: default_fade_duration_ms(),
            placeholder_opacity: default_placeholder_opacity(),
            easing: Some(Easing::default()),
            show_error_indicator: Some(false),
        }
    }
}

impl TileConfig {
    #[must_use]
    pub fn fade_duration(&self) -> FadeDuration {
        FadeDuration::from_millis(self.fade_duration_ms.unwrap_or(DEFAULT_FADE_DURATION_MS))
    }

    #[must_use]
    pub fn placeholder_opacity(&self) -> f32 {
        let value = self
            .placeholder_opacity
            .unwrap_or(DEFAULT_PLACEHOLDER_OPACITY);
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            DEFAULT_PLACEHOLDER_OPACITY
        }
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing.unwrap_or_default()
    }

    #[must_use]
    pub fn show_error_indicator(&self) -> bool {
        self.show_error_indicator.unwrap_or(false)
    }
}

/// Image loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Decode images on the blocking thread pool instead of inline.
    #[serde(
        default = "default_async_decode",
        skip_serializing_if = "Option::is_none"
    )]
    pub async_decode: Option<bool>,

    /// Number of decoded images kept in memory.
    #[serde(
        default = "default_cache_max_images",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_max_images: Option<usize>,

    /// Timeout for remote image requests in seconds.
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_secs: Option<u64>,

    /// Selected icon theme, substituted into `icon:<path>` sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_theme: Option<String>,

    /// Directory holding icon themes. Defaults to `<data dir>/themes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            async_decode: default_async_decode(),
            cache_max_images: default_cache_max_images(),
            request_timeout_secs: default_request_timeout_secs(),
            icon_theme: None,
            themes_dir: None,
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn async_decode(&self) -> bool {
        self.async_decode.unwrap_or(true)
    }

    #[must_use]
    pub fn cache_max_images(&self) -> usize {
        self.cache_max_images
            .unwrap_or(DEFAULT_CACHE_MAX_IMAGES)
            .clamp(MIN_CACHE_MAX_IMAGES, MAX_CACHE_MAX_IMAGES)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn icon_theme(&self) -> &str {
        match self.icon_theme.as_deref() {
            Some(theme) if !theme.trim().is_empty() => theme,
            _ => DEFAULT_ICON_THEME,
        }
    }

    /// Resolves the icon themes directory, if one can be determined.
    #[must_use]
    pub fn themes_dir(&self) -> Option<PathBuf> {
        self.themes_dir
            .clone()
            .or_else(|| paths::get_app_data_dir().map(|dir| dir.join("themes")))
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tile: TileConfig,

    #[serde(default)]
    pub loader: LoaderConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_fade_duration_ms() -> Option<u64> {
    Some(DEFAULT_FADE_DURATION_MS)
}

fn default_placeholder_opacity() -> Option<f32> {
    Some(DEFAULT_PLACEHOLDER_OPACITY)
}

fn default_async_decode() -> Option<bool> {
    Some(true)
}

fn default_cache_max_images() -> Option<usize> {
    Some(DEFAULT_CACHE_MAX_IMAGES)
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            tile: TileConfig {
                fade_duration_ms: Some(400),
                placeholder_opacity: Some(0.3),
                easing: Some(Easing::Linear),
                show_error_indicator: Some(true),
            },
            loader: LoaderConfig {
                async_decode: Some(false),
                cache_max_images: Some(8),
                request_timeout_secs: Some(5),
                icon_theme: Some("night".to_string()),
                themes_dir: Some(PathBuf::from("/tmp/themes")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[tile\nfade_duration_ms = ").expect("write failed");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[tile]\nshow_error_indicator = true\n")
            .expect("partial config should parse");

        assert!(config.tile.show_error_indicator());
        assert_eq!(config.tile.fade_duration_ms, Some(DEFAULT_FADE_DURATION_MS));
        assert_eq!(config.loader, LoaderConfig::default());
    }

    #[test]
    fn easing_is_kebab_case() {
        let config: Config = toml::from_str("[tile]\neasing = \"ease-in-out-cubic\"\n")
            .expect("easing should parse");
        assert_eq!(config.tile.easing(), Easing::EaseInOutCubic);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let tile = TileConfig {
            fade_duration_ms: Some(0),
            placeholder_opacity: Some(3.0),
            ..TileConfig::default()
        };
        assert_eq!(
            tile.fade_duration().as_duration(),
            Duration::from_millis(MIN_FADE_DURATION_MS)
        );
        assert_eq!(tile.placeholder_opacity(), 1.0);

        let loader = LoaderConfig {
            cache_max_images: Some(0),
            request_timeout_secs: Some(10_000),
            icon_theme: Some("  ".to_string()),
            ..LoaderConfig::default()
        };
        assert_eq!(loader.cache_max_images(), MIN_CACHE_MAX_IMAGES);
        assert_eq!(
            loader.request_timeout(),
            Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(loader.icon_theme(), DEFAULT_ICON_THEME);
    }

    #[test]
    fn load_with_override_reports_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "tile = 3").expect("write failed");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }
}
