use anyhow::Context;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use pix332_core::format::{Dimensions, RgbFrame};

/// Resizes RGB frames with area averaging (box convolution): each output
/// pixel is the mean of the source pixels under its footprint.
pub struct FrameResizer {
    resizer: Resizer,
    options: ResizeOptions,
}

impl FrameResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box)),
        }
    }

    /// Resize a frame to the target dimensions. Returns a copy when the
    /// source already matches.
    pub fn resize(&mut self, src: &RgbFrame, target: Dimensions) -> anyhow::Result<RgbFrame> {
        if src.width == target.width && src.height == target.height {
            return Ok(src.clone());
        }

        let src_image = Image::from_vec_u8(src.width, src.height, src.data.clone(), PixelType::U8x3)
            .context("failed to create source image")?;

        let mut dst_image = Image::new(target.width, target.height, PixelType::U8x3);

        self.resizer
            .resize(&src_image, &mut dst_image, &self.options)
            .context("resize failed")?;

        RgbFrame::new(target.width, target.height, dst_image.into_vec())
    }
}
