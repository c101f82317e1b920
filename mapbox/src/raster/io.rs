//! Image file helpers for marker overlays and composited output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use super::types::RasterError;

/// JPEG quality used when saving composites.
const JPEG_QUALITY: u8 = 90;

/// Loads an image from disk as RGBA (marker overlays, usually PNG).
pub fn load_image(path: &Path) -> Result<RgbaImage, RasterError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Saves an image as JPEG at quality 90, flattening the alpha channel.
pub fn save_jpeg(image: &RgbaImage, path: &Path) -> Result<(), RasterError> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    Ok(())
}

/// Saves an image as PNG, preserving alpha.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), RasterError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
