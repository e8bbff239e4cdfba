use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal;
use pix332_core::format::{Dimensions, DisplayLimits, RgbFrame};
use pix332_core::render::render_frame;

use crate::resize::FrameResizer;

/// Parse a `WIDTHxHEIGHT` request, e.g. `160x120`.
pub fn parse_size(line: &str) -> anyhow::Result<Dimensions> {
    let (ws, hs) = line
        .trim()
        .split_once('x')
        .context("expected WIDTHxHEIGHT, e.g. 160x120")?;
    let width: u32 = ws.trim().parse().context("width is not a number")?;
    let height: u32 = hs.trim().parse().context("height is not a number")?;
    if width == 0 || height == 0 {
        bail!("dimensions must be positive");
    }
    Ok(Dimensions { width, height })
}

/// Shrink `src` to fit inside `bounds`, preserving aspect ratio. Never
/// upscales and never returns a zero dimension.
pub fn fit_dimensions(src: Dimensions, bounds: Dimensions) -> Dimensions {
    if src.width <= bounds.width && src.height <= bounds.height {
        return src;
    }
    let (sw, sh) = (src.width as u64, src.height as u64);
    let (bw, bh) = (bounds.width as u64, bounds.height as u64);
    let (width, height) = if sw * bh > sh * bw {
        (bw, (sh * bw / sw).max(1))
    } else {
        ((sw * bh / sh).max(1), bh)
    };
    Dimensions {
        width: width as u32,
        height: height as u32,
    }
}

/// Terminal-facing side of the size prompt, pulled behind a trait so the
/// confirmation loop can be driven by scripted input in tests.
pub trait PromptIo {
    /// Ask for a target size. `current` is the source's dimensions.
    /// Returns `None` once input is exhausted (user closed stdin).
    fn read_size_line(&mut self, current: Dimensions) -> anyhow::Result<Option<String>>;

    /// Report a recoverable problem with the last request.
    fn notice(&mut self, msg: &str) -> anyhow::Result<()>;

    /// Show a frame to the user.
    fn preview(&mut self, frame: &RgbFrame, caption: &str) -> anyhow::Result<()>;

    /// Single keystroke after a resized preview; `true` accepts it.
    fn confirm(&mut self) -> anyhow::Result<bool>;
}

/// Run the size prompt until the user accepts a preview or cancels.
///
/// Each round previews the original (as `thumb`, pre-fit for the screen),
/// prompts for `WIDTHxHEIGHT`, and re-prompts on malformed or out-of-bounds
/// requests without touching any image state. Valid requests resize the
/// ORIGINAL frame — never an earlier resize — and show the result; the
/// confirmation key keeps it, anything else starts the round over.
pub fn choose_dimensions(
    io: &mut dyn PromptIo,
    resizer: &mut FrameResizer,
    source: &RgbFrame,
    thumb: &RgbFrame,
    limits: DisplayLimits,
) -> anyhow::Result<Option<RgbFrame>> {
    loop {
        io.preview(thumb, "input image")?;

        let resized = loop {
            let line = match io.read_size_line(source.dimensions())? {
                Some(line) => line,
                None => return Ok(None),
            };
            let dims = match parse_size(&line) {
                Ok(dims) => dims,
                Err(err) => {
                    io.notice(&format!("{err:#}"))?;
                    continue;
                }
            };
            if let Err(err) = limits.check(dims) {
                io.notice(&format!("{err:#}"))?;
                continue;
            }
            break resizer.resize(source, dims)?;
        };

        io.preview(
            &resized,
            &format!("resized to {}x{}", resized.width, resized.height),
        )?;
        if io.confirm()? {
            return Ok(Some(resized));
        }
    }
}

/// Real prompt: size lines from stdin, previews on stdout, one raw-mode
/// keystroke for confirmation.
pub struct TerminalPrompt {
    accept_key: char,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self { accept_key: 'c' }
    }
}

impl PromptIo for TerminalPrompt {
    fn read_size_line(&mut self, current: Dimensions) -> anyhow::Result<Option<String>> {
        eprint!(
            "This image is currently {}x{}.\nWhat would you like it resized to? [WIDTHxHEIGHT] ",
            current.width, current.height
        );
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            eprintln!();
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn notice(&mut self, msg: &str) -> anyhow::Result<()> {
        eprintln!("{msg}");
        Ok(())
    }

    fn preview(&mut self, frame: &RgbFrame, caption: &str) -> anyhow::Result<()> {
        let (term_cols, term_rows) = terminal::size()?;
        let cell_rows = frame.height.div_ceil(2);
        if frame.width > term_cols as u32 || cell_rows > term_rows as u32 {
            eprintln!(
                "Warning: terminal is {}x{} cells but the preview needs {}x{}.",
                term_cols, term_rows, frame.width, cell_rows
            );
        }

        let mut buf = Vec::with_capacity(frame.data.len() * 4);
        render_frame(frame, &mut buf);
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&buf)?;
        writeln!(stdout, "\n{caption} ({}x{} px)", frame.width, frame.height)?;
        stdout.flush()?;
        Ok(())
    }

    fn confirm(&mut self) -> anyhow::Result<bool> {
        eprintln!(
            "Press '{}' to keep this size, any other key to pick new dimensions.",
            self.accept_key
        );
        terminal::enable_raw_mode()?;
        let accepted = loop {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                break code == KeyCode::Char(self.accept_key);
            }
        };
        terminal::disable_raw_mode()?;
        Ok(accepted)
    }
}
