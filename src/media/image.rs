// SPDX-License-Identifier: MPL-2.0
//! Image decoding from raw bytes (PNG, JPEG, GIF, WebP, SVG, ...).
//!
//! Bytes arrive from a file, an HTTP response body or an image provider; the
//! format is sniffed from the content, with the source path as a hint for SVG.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use resvg::usvg;

/// A decoded picture ready to be handed to an Iced image widget.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Returns `true` if the bytes (or the name they came from) look like SVG.
#[must_use]
pub fn looks_like_svg(bytes: &[u8], name_hint: Option<&str>) -> bool {
    if let Some(name) = name_hint {
        let name = name.split(['?', '#']).next().unwrap_or(name);
        if name
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            return true;
        }
    }

    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Decodes encoded image bytes into RGBA pixels.
///
/// # Errors
///
/// - [`Error::Svg`] if the bytes look like SVG but cannot be rasterized
/// - [`Error::Decode`] if the raster format is invalid or unsupported
pub fn decode(bytes: &[u8], name_hint: Option<&str>) -> Result<ImageData> {
    if looks_like_svg(bytes, name_hint) {
        return rasterize_svg(bytes);
    }

    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

fn rasterize_svg(bytes: &[u8]) -> Result<ImageData> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let pixmap_size = tree.size().to_int_size();
    let width = pixmap_size.width();
    let height = pixmap_size.height();
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied RGBA; the image widget expects straight alpha.
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    Ok(ImageData::from_rgba(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_bytes;

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let data = decode(&png_bytes(4, 2), None).expect("png should decode");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
    }

    #[test]
    fn decode_svg_rasterizes_successfully() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="6" height="3">
                <rect width="6" height="3" fill="blue" />
            </svg>"#;

        let data = decode(svg, None).expect("svg should rasterize");
        assert_eq!(data.width, 6);
        assert_eq!(data.height, 3);
    }

    #[test]
    fn decode_garbage_returns_decode_error() {
        match decode(b"definitely not an image", Some("avatar.png")) {
            Err(Error::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_svg_returns_svg_error() {
        match decode(b"<svg", Some("broken.svg")) {
            Err(Error::Svg(_)) => {}
            other => panic!("expected svg error, got {:?}", other),
        }
    }

    #[test]
    fn svg_detection_uses_extension_and_content() {
        assert!(looks_like_svg(b"", Some("icons/reply.SVG?size=32")));
        assert!(looks_like_svg(b"<?xml version=\"1.0\"?><svg/>", None));
        assert!(!looks_like_svg(&png_bytes(1, 1), Some("avatar.png")));
    }
}
