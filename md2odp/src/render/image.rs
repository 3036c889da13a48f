//! Image sources, media types and natural sizes of embedded pictures.

use crate::error::{RenderError, RenderResult};
use log::debug;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use url::Url;

/// File name prefix of embedded pictures inside the package.
pub const IMAGE_PREFIX: &str = "odpdown_image_";

/// Size assumed when the picture's dimensions cannot be determined.
pub const FALLBACK_SIZE: (f64, f64) = (100.0, 100.0);

/// Where the bytes of an image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    Local(PathBuf),
}

impl ImageSource {
    /// Interpret a markdown image locator. `http` and `https` URLs are remote, everything else
    /// is a local path, relative ones resolved against `base_dir`.
    pub fn parse(locator: &str, base_dir: Option<&Path>) -> Self {
        if let Ok(url) = Url::parse(locator) {
            match url.scheme() {
                "http" | "https" => return ImageSource::Remote(url),
                "file" => {
                    if let Ok(path) = url.to_file_path() {
                        return ImageSource::Local(path);
                    }
                }
                _ => {}
            }
        }

        let path = PathBuf::from(strip_query_and_fragment(locator));
        match base_dir {
            Some(base) if path.is_relative() => ImageSource::Local(base.join(path)),
            _ => ImageSource::Local(path),
        }
    }

    /// Lowercased file extension, empty when there is none.
    pub fn extension(&self) -> String {
        let extension = match self {
            ImageSource::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .and_then(|name| name.rsplit_once('.'))
                .map(|(_, extension)| extension.to_string()),
            ImageSource::Local(path) => path
                .extension()
                .map(|extension| extension.to_string_lossy().into_owned()),
        };
        extension.unwrap_or_default().to_lowercase()
    }

    /// Read the image bytes. Blocks until a remote download completes.
    pub fn fetch(&self) -> RenderResult<Vec<u8>> {
        match self {
            ImageSource::Remote(url) => {
                debug!("Downloading image {url}");
                let response = ureq::get(url.as_str())
                    .call()
                    .map_err(|e| fetch_error(url.as_str(), e))?;
                let mut data = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut data)
                    .map_err(|e| fetch_error(url.as_str(), e))?;
                Ok(data)
            }
            ImageSource::Local(path) => {
                std::fs::read(path).map_err(|e| fetch_error(&path.display().to_string(), e))
            }
        }
    }
}

fn fetch_error(locator: &str, reason: impl std::fmt::Display) -> RenderError {
    RenderError::ImageFetch {
        locator: locator.to_string(),
        reason: reason.to_string(),
    }
}

fn strip_query_and_fragment(locator: &str) -> &str {
    locator
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or(locator)
}

/// MIME type registered in the manifest for an extension.
pub fn media_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Package path for a new picture, unique across conversions into the same document.
pub fn asset_path(extension: &str) -> String {
    let id = format!("{:032x}", fastrand::u128(..));
    if extension.is_empty() {
        format!("Pictures/{IMAGE_PREFIX}{id}")
    } else {
        format!("Pictures/{IMAGE_PREFIX}{id}.{extension}")
    }
}

/// Natural width and height of a picture, or [`FALLBACK_SIZE`].
pub fn natural_size(data: &[u8], extension: &str) -> (f64, f64) {
    let size = if extension == "svg" {
        svg_size(data)
    } else {
        raster_size(data)
    };
    size.unwrap_or_else(|| {
        debug!("Could not determine image size, assuming {FALLBACK_SIZE:?}");
        FALLBACK_SIZE
    })
}

fn raster_size(data: &[u8]) -> Option<(f64, f64)> {
    let (width, height) = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    positive(f64::from(width), f64::from(height))
}

fn svg_size(data: &[u8]) -> Option<(f64, f64)> {
    let text = std::str::from_utf8(data).ok()?;
    let doc = roxmltree::Document::parse(text).ok()?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return None;
    }

    let attribute = |name: &str| root.attribute(name).and_then(leading_number);
    if let (Some(width), Some(height)) = (attribute("width"), attribute("height")) {
        if let Some(size) = positive(width, height) {
            return Some(size);
        }
    }

    let view_box: Vec<f64> = root
        .attribute("viewBox")?
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match view_box.as_slice() {
        [_, _, width, height] => positive(*width, *height),
        _ => None,
    }
}

/// Number at the start of an SVG length, ignoring its unit. Percentages have no natural size.
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.ends_with('%') {
        return None;
    }
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn positive(width: f64, height: f64) -> Option<(f64, f64)> {
    (width > 0.0 && height > 0.0).then_some((width, height))
}
