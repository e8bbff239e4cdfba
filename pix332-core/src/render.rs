use std::io::Write;

use crate::format::RgbFrame;

const HALF_BLOCK: &str = "▄";

/// Render a frame into an ANSI truecolor byte buffer, two pixels per
/// character cell: the background colors the top pixel, the foreground the
/// lower-half-block glyph beneath it. Escape sequences are skipped while
/// the colors repeat. Odd heights get a black bottom half on the last row.
///
/// The output carries no cursor positioning, only `\r\n` row breaks and a
/// final color reset, so callers decide where it lands on screen.
pub fn render_frame(frame: &RgbFrame, buf: &mut Vec<u8>) {
    let rows = frame.height.div_ceil(2);

    let mut prev_bg = None;
    let mut prev_fg = None;

    for row in 0..rows {
        if row > 0 {
            buf.extend_from_slice(b"\r\n");
        }
        let top_y = row * 2;
        let bot_y = top_y + 1;

        for x in 0..frame.width {
            let bg = frame.pixel(x, top_y);
            let fg = if bot_y < frame.height {
                frame.pixel(x, bot_y)
            } else {
                (0, 0, 0)
            };

            if prev_bg != Some(bg) {
                let (r, g, b) = bg;
                let _ = write!(buf, "\x1b[48;2;{r};{g};{b}m");
                prev_bg = Some(bg);
            }
            if prev_fg != Some(fg) {
                let (r, g, b) = fg;
                let _ = write!(buf, "\x1b[38;2;{r};{g};{b}m");
                prev_fg = Some(fg);
            }

            buf.extend_from_slice(HALF_BLOCK.as_bytes());
        }
    }

    buf.extend_from_slice(b"\x1b[0m");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RgbFrame;

    #[test]
    fn colors_and_glyphs_appear_in_order() {
        // One cell: red on top, blue below.
        let frame = RgbFrame::new(1, 2, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let mut buf = Vec::new();
        render_frame(&frame, &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "\x1b[48;2;255;0;0m\x1b[38;2;0;0;255m▄\x1b[0m");
    }

    #[test]
    fn repeated_colors_skip_escapes() {
        // Two identical cells: escapes only once, glyph twice.
        let frame = RgbFrame::new(2, 2, vec![9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9]).unwrap();
        let mut buf = Vec::new();
        render_frame(&frame, &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("\x1b[48;2;").count(), 1);
        assert_eq!(out.matches("\x1b[38;2;").count(), 1);
        assert_eq!(out.matches('▄').count(), 2);
    }

    #[test]
    fn odd_height_renders_black_bottom() {
        let frame = RgbFrame::new(1, 1, vec![255, 255, 255]).unwrap();
        let mut buf = Vec::new();
        render_frame(&frame, &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\x1b[38;2;0;0;0m"));
    }

    #[test]
    fn rows_break_with_crlf() {
        let frame = RgbFrame::new(1, 4, vec![0; 12]).unwrap();
        let mut buf = Vec::new();
        render_frame(&frame, &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("\r\n").count(), 1);
    }
}
