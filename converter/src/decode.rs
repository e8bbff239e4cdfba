use std::path::Path;

use anyhow::Context;
use image::ImageReader;
use pix332_core::format::RgbFrame;

/// Decode a raster image file into an RGB24 frame.
pub fn decode_image(path: &Path) -> anyhow::Result<RgbFrame> {
    let img = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    RgbFrame::new(width, height, rgb.into_raw())
}
