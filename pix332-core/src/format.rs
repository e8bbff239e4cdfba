use anyhow::bail;

/// A decoded or resized image: RGB24 data, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            bail!(
                "frame buffer is {} bytes, expected {} for {width}x{height} RGB24",
                data.len(),
                expected
            );
        }
        Ok(Self { width, height, data })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB triple at (x, y). Caller keeps coordinates in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let off = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[off], self.data[off + 1], self.data[off + 2])
    }
}

/// A quantized image: one RGB332 byte per pixel, row-major, same shape as
/// the frame it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rgb332Grid {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Rgb332Grid {
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(self.width as usize)
    }
}

/// A target size requested at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Device limits for the output panel. Passed through the pipeline rather
/// than read from globals; the CLI defaults these to 320x240.
#[derive(Clone, Copy, Debug)]
pub struct DisplayLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl DisplayLimits {
    pub fn check(&self, dims: Dimensions) -> anyhow::Result<()> {
        if dims.width > self.max_width {
            bail!("the image must be at most {}px wide", self.max_width);
        }
        if dims.height > self.max_height {
            bail!("the image must be at most {}px tall", self.max_height);
        }
        Ok(())
    }
}

/// A parsed array artifact: identifier plus the pixel grid it declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CArray {
    pub name: String,
    pub grid: Rgb332Grid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_buffer_length_is_validated() {
        assert!(RgbFrame::new(2, 2, vec![0; 12]).is_ok());
        assert!(RgbFrame::new(2, 2, vec![0; 11]).is_err());
        assert!(RgbFrame::new(2, 2, vec![0; 16]).is_err());
    }

    #[test]
    fn limits_reject_either_axis_independently() {
        let limits = DisplayLimits { max_width: 320, max_height: 240 };
        assert!(limits.check(Dimensions { width: 320, height: 240 }).is_ok());
        assert!(limits.check(Dimensions { width: 1, height: 1 }).is_ok());
        assert!(limits.check(Dimensions { width: 321, height: 240 }).is_err());
        assert!(limits.check(Dimensions { width: 320, height: 241 }).is_err());
    }
}
