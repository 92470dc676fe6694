//! Screenshot-gallery harness: a directory of pre-rendered PNG artifacts is
//! loaded once at startup and each is served as a page whose image is the
//! artifact re-encoded losslessly as an inline data URI.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("failed to read image directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Enumerate `*.png` artifacts and key each decoded image by the page name
/// it was captured from (`foo.png` maps to the `foo.py` page path).
pub fn load_images(dir: &Path) -> Result<BTreeMap<String, DynamicImage>, GalleryError> {
    let mut images = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(fname) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if !is_png {
            warn!("Skipping non-PNG artifact: {}", fname);
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(fname);
        let image = image::open(&path)?;
        images.insert(format!("{}.py", stem), image);
    }
    info!("Loaded {} gallery images from {}", images.len(), dir.display());
    Ok(images)
}

/// Re-encode an image as an inline `data:` URI. PNG is lossless; the JPEG
/// path flattens alpha onto a white background first, since JPEG has no
/// alpha channel.
pub fn encode_data_uri(image: &DynamicImage, ext: &str) -> Result<String, GalleryError> {
    let ext = if ext == "jpg" { "jpeg" } else { ext };
    let (format, image) = match ext {
        "png" => (ImageFormat::Png, image.clone()),
        "jpeg" => (ImageFormat::Jpeg, flatten_onto_white(image)),
        other => return Err(GalleryError::UnsupportedFormat(other.to_string())),
    };

    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(format!("data:image/{};base64,{}", ext, BASE64.encode(&buffer)))
}

/// Decode a data URI produced by `encode_data_uri`. Test seam for the
/// round-trip property.
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage, GalleryError> {
    let payload = uri
        .split_once("base64,")
        .map(|(_, b64)| b64)
        .unwrap_or_default();
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| GalleryError::UnsupportedFormat(e.to_string()))?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Render the display frame. `src` is the inline data URI of the image to
/// show; `None` leaves the frame empty (the root and unmapped paths).
pub fn render_frame(src: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    use serde_json::json;

    let handlebars = crate::common::get_handlebars();
    let res = handlebars.render_template(&get_template(), &json!({ "src": src }))?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("gallery.hbs").to_string()
}

fn flatten_onto_white(image: &DynamicImage) -> DynamicImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let out = rgb.get_pixel_mut(x, y);
        for channel in 0..3 {
            let fg = pixel[channel] as u32;
            let bg = out[channel] as u32;
            out[channel] = ((fg * alpha + bg * (255 - alpha)) / 255) as u8;
        }
    }
    DynamicImage::ImageRgb8(rgb)
}
