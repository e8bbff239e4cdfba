mod decode;
mod interact;
mod resize;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::terminal;
use pix332_core::encode::write_c_array;
use pix332_core::format::{Dimensions, DisplayLimits};
use pix332_core::quantize::quantize_frame;

use crate::decode::decode_image;
use crate::interact::{choose_dimensions, fit_dimensions, TerminalPrompt};
use crate::resize::FrameResizer;

#[derive(Parser)]
#[command(name = "pix332-convert", about = "Convert an image to an RGB332 C array")]
struct Cli {
    /// Input image file path
    input: PathBuf,

    /// Output .c file path (default: input with .c extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Display width limit in pixels
    #[arg(long, default_value = "320")]
    max_width: u32,

    /// Display height limit in pixels
    #[arg(long, default_value = "240")]
    max_height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.input.exists() {
        bail!("image path {} does not exist", cli.input.display());
    }

    let source = decode_image(&cli.input)?;
    eprintln!("Source: {}x{} pixels", source.width, source.height);

    let limits = DisplayLimits {
        max_width: cli.max_width,
        max_height: cli.max_height,
    };

    let mut resizer = FrameResizer::new();

    // Thumbnail of the original, shrunk to the terminal's pixel grid
    // (two pixels per character row, a few rows spared for the prompt).
    let (term_cols, term_rows) = terminal::size().unwrap_or((80, 24));
    let screen = Dimensions {
        width: (term_cols as u32).max(1),
        height: (term_rows.saturating_sub(4) as u32).max(1) * 2,
    };
    let thumb = resizer.resize(&source, fit_dimensions(source.dimensions(), screen))?;

    let mut prompt = TerminalPrompt::new();
    let resized = match choose_dimensions(&mut prompt, &mut resizer, &source, &thumb, limits)? {
        Some(frame) => frame,
        None => {
            eprintln!("No size confirmed, nothing written.");
            return Ok(());
        }
    };

    let grid = quantize_frame(&resized);

    let output_path = cli.output.unwrap_or_else(|| {
        let mut p = cli.input.clone();
        p.set_extension("c");
        p
    });
    let name = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("output path has no usable file name")?
        .to_string();

    let file = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_c_array(&mut writer, &grid, &name)?;
    writer.flush()?;

    eprintln!(
        "Wrote {} ({}x{}, {} bytes of pixel data)",
        output_path.display(),
        grid.width,
        grid.height,
        grid.pixels.len()
    );

    Ok(())
}
