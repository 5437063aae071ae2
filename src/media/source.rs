// SPDX-License-Identifier: MPL-2.0
//! Parsing of image source strings.
//!
//! A tile's `source` is a plain string, the way a container template would
//! write it:
//!
//! - `https://pbs.twimg.com/profile_images/…` - fetched over HTTP(S)
//! - `file:///home/me/avatar.png` or `/home/me/avatar.png` - read from disk
//! - `image://icon/default/actions/reply.svg` - served by a named image provider

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

const PROVIDER_SCHEME: &str = "image://";
const FILE_SCHEME: &str = "file://";
const ICON_SHORTHAND: &str = "icon:";

/// Expands the `icon:<path>` shorthand into
/// `image://icon/<theme>/<path>` using the selected theme. Other sources are
/// returned unchanged.
///
/// ```
/// use tsubame::media::source::expand_icon_shorthand;
///
/// assert_eq!(
///     expand_icon_shorthand("icon:actions/reply.svg", "night"),
///     "image://icon/night/actions/reply.svg"
/// );
/// assert_eq!(expand_icon_shorthand("/tmp/a.png", "night"), "/tmp/a.png");
/// ```
#[must_use]
pub fn expand_icon_shorthand(raw: &str, theme: &str) -> String {
    match raw.trim().strip_prefix(ICON_SHORTHAND) {
        Some(path) => format!(
            "{}icon/{}/{}",
            PROVIDER_SCHEME,
            theme,
            path.trim_start_matches('/')
        ),
        None => raw.to_string(),
    }
}

/// A parsed image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
    Provider { provider: String, id: String },
}

impl ImageSource {
    /// Parses a source string.
    ///
    /// Returns `Ok(None)` for an empty source, which means "no image".
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] for `image://` sources without a provider
    /// or image id.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = raw.strip_prefix(PROVIDER_SCHEME) {
            return match rest.split_once('/') {
                Some((provider, id)) if !provider.is_empty() && !id.is_empty() => {
                    Ok(Some(ImageSource::Provider {
                        provider: provider.to_string(),
                        id: id.to_string(),
                    }))
                }
                _ => Err(Error::Provider(format!("provider ID missing: {raw}"))),
            };
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Some(ImageSource::Remote(raw.to_string())));
        }

        let path = raw.strip_prefix(FILE_SCHEME).unwrap_or(raw);
        Ok(Some(ImageSource::Local(PathBuf::from(path))))
    }

    /// Name used to sniff the image format (the path or URL).
    #[must_use]
    pub fn name_hint(&self) -> String {
        match self {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Local(path) => path.to_string_lossy().into_owned(),
            ImageSource::Provider { id, .. } => id.clone(),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Remote(url) => write!(f, "{}", url),
            ImageSource::Local(path) => write!(f, "{}", path.display()),
            ImageSource::Provider { provider, id } => {
                write!(f, "{}{}/{}", PROVIDER_SCHEME, provider, id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_means_no_image() {
        assert_eq!(ImageSource::parse("").unwrap(), None);
        assert_eq!(ImageSource::parse("   ").unwrap(), None);
    }

    #[test]
    fn http_urls_are_remote() {
        let source = ImageSource::parse("HTTPS://pbs.twimg.com/media/a.jpg").unwrap();
        assert_eq!(
            source,
            Some(ImageSource::Remote(
                "HTTPS://pbs.twimg.com/media/a.jpg".to_string()
            ))
        );
    }

    #[test]
    fn file_scheme_and_bare_paths_are_local() {
        assert_eq!(
            ImageSource::parse("file:///tmp/a.png").unwrap(),
            Some(ImageSource::Local(PathBuf::from("/tmp/a.png")))
        );
        assert_eq!(
            ImageSource::parse("avatars/b.png").unwrap(),
            Some(ImageSource::Local(PathBuf::from("avatars/b.png")))
        );
    }

    #[test]
    fn provider_sources_split_on_first_slash() {
        let source = ImageSource::parse("image://icon/default/actions/reply.svg").unwrap();
        assert_eq!(
            source,
            Some(ImageSource::Provider {
                provider: "icon".to_string(),
                id: "default/actions/reply.svg".to_string(),
            })
        );
    }

    #[test]
    fn provider_source_without_id_is_rejected() {
        for raw in ["image://icon", "image://icon/", "image:///reply.svg"] {
            match ImageSource::parse(raw) {
                Err(Error::Provider(message)) => assert!(message.contains("provider ID missing")),
                other => panic!("expected provider error for {raw}, got {:?}", other),
            }
        }
    }

    #[test]
    fn icon_shorthand_uses_selected_theme() {
        assert_eq!(
            expand_icon_shorthand(" icon:/reply.svg?color=red", "default"),
            "image://icon/default/reply.svg?color=red"
        );
        assert_eq!(
            expand_icon_shorthand("image://icon/night/reply.svg", "default"),
            "image://icon/night/reply.svg"
        );
    }

    #[test]
    fn display_round_trips_provider_sources() {
        let raw = "image://icon/default/reply.svg";
        let source = ImageSource::parse(raw).unwrap().unwrap();
        assert_eq!(source.to_string(), raw);
        assert_eq!(source.name_hint(), "default/reply.svg");
    }
}
