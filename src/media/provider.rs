// SPDX-License-Identifier: MPL-2.0
//! Named image providers for `image://<provider>/<id>` sources.
//!
//! Providers hand back encoded bytes; decoding stays with the loader so every
//! source kind goes through the same path.

use crate::config::DEFAULT_ICON_THEME;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Something that can produce encoded image bytes for an id.
pub trait ImageProvider: Send + Sync {
    /// Returns the encoded bytes for `id`.
    fn image(&self, id: &str) -> Result<Vec<u8>>;
}

/// Maps provider ids (the host part of `image://` sources) to providers.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ImageProvider>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.providers.keys().collect();
        names.sort();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, provider: impl ImageProvider + 'static) {
        self.providers.insert(name.into(), Arc::new(provider));
    }

    /// Asks the provider registered as `provider` for `id`.
    ///
    /// # Errors
    ///
    /// [`Error::Provider`] if no such provider is registered, or whatever the
    /// provider itself reports.
    pub fn image(&self, provider: &str, id: &str) -> Result<Vec<u8>> {
        let Some(handler) = self.providers.get(provider) else {
            log::error!("image provider for this ID is missing: {}", provider);
            return Err(Error::Provider(format!(
                "image provider for this ID is missing: {provider}"
            )));
        };
        handler.image(id)
    }
}

/// Serves icon files from themed folders.
///
/// Ids look like `<theme>/<path…>/<file>`. Anything after a `?` in the last
/// segment is dropped. Icons missing from the requested theme are looked up
/// in the `default` theme.
#[derive(Debug, Clone)]
pub struct IconProvider {
    themes_dir: PathBuf,
}

impl IconProvider {
    #[must_use]
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
        }
    }

    /// Resolves an icon id to an existing file.
    ///
    /// # Errors
    ///
    /// [`Error::Provider`] if the id is malformed or the icon exists in
    /// neither the requested theme nor the default one.
    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        let mut segments: Vec<&str> = id.split('/').filter(|s| !s.is_empty()).collect();
        if let Some(last) = segments.last_mut() {
            if let Some(stripped) = last.split('?').next() {
                *last = stripped;
            }
        }

        if segments.len() < 2 || segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(Error::Provider(format!("malformed icon id: {id}")));
        }

        let theme = segments[0];
        let rest = &segments[1..];

        let themed = self.icon_path(theme, rest);
        if themed.is_file() {
            return Ok(themed);
        }

        let fallback = self.icon_path(DEFAULT_ICON_THEME, rest);
        if fallback.is_file() {
            log::debug!("icon {} missing from theme {}, using default", id, theme);
            return Ok(fallback);
        }

        log::error!(
            "Icon not found (in both {} theme and default theme): {}",
            theme,
            themed.display()
        );
        Err(Error::Provider(format!("icon not found: {id}")))
    }

    fn icon_path(&self, theme: &str, rest: &[&str]) -> PathBuf {
        let mut path = self.themes_dir.join(theme);
        path.extend(rest);
        path
    }
}

impl ImageProvider for IconProvider {
    fn image(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.resolve(id)?;
        Ok(std::fs::read(path)?)
    }
}
