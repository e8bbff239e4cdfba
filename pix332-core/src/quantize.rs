use crate::format::{Rgb332Grid, RgbFrame};

/// Pack a 24-bit RGB triple into one RGB332 byte (layout RRRGGGBB).
/// Channels are truncated to their field width, never rounded, so 255
/// lands on 7 (or 3 for blue) and no field can overflow.
#[inline]
pub fn pack_rgb332(r: u8, g: u8, b: u8) -> u8 {
    let r3 = r / 32;
    let g3 = g / 32;
    let b2 = b / 64;
    (r3 << 5) | (g3 << 2) | b2
}

/// Expand an RGB332 byte back to an RGB triple for display. Each field is
/// scaled to the full 0-255 range; `pack_rgb332` of the result gives back
/// the original byte.
#[inline]
pub fn unpack_rgb332(v: u8) -> (u8, u8, u8) {
    let r3 = (v >> 5) & 0x07;
    let g3 = (v >> 2) & 0x07;
    let b2 = v & 0x03;
    (
        (r3 as u16 * 255 / 7) as u8,
        (g3 as u16 * 255 / 7) as u8,
        (b2 as u16 * 255 / 3) as u8,
    )
}

/// Quantize a full frame. Each pixel maps independently.
pub fn quantize_frame(frame: &RgbFrame) -> Rgb332Grid {
    let mut pixels = Vec::with_capacity(frame.width as usize * frame.height as usize);
    for rgb in frame.data.chunks_exact(3) {
        pixels.push(pack_rgb332(rgb[0], rgb[1], rgb[2]));
    }
    Rgb332Grid {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}

/// Expand a quantized grid into an RGB24 frame for preview.
pub fn expand_frame(grid: &Rgb332Grid) -> RgbFrame {
    let mut data = Vec::with_capacity(grid.pixels.len() * 3);
    for &v in &grid.pixels {
        let (r, g, b) = unpack_rgb332(v);
        data.extend_from_slice(&[r, g, b]);
    }
    RgbFrame {
        width: grid.width,
        height: grid.height,
        data,
    }
}
