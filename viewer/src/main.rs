use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal;

use pix332_core::decode::parse_c_array;
use pix332_core::quantize::expand_frame;
use pix332_core::render::render_frame;

#[derive(Parser)]
#[command(name = "pix332-view", about = "Preview a generated RGB332 array in the terminal")]
struct Cli {
    /// Path to a generated .c array file
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let src = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let array = parse_c_array(&src)
        .with_context(|| format!("{} is not a pix332 array file", cli.input.display()))?;
    let frame = expand_frame(&array.grid);

    let cell_rows = frame.height.div_ceil(2) as u16;
    let (term_cols, term_rows) = terminal::size()?;
    if term_cols < frame.width as u16 || term_rows < cell_rows + 1 {
        eprintln!(
            "Warning: terminal is {}x{} but the image needs {}x{}. Resize your terminal for best results.",
            term_cols,
            term_rows,
            frame.width,
            cell_rows + 1
        );
    }

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = cleanup_terminal();
        original_hook(info);
    }));

    terminal::enable_raw_mode()?;
    let stdout = std::io::stdout();
    let mut stdout = BufWriter::with_capacity(256 * 1024, stdout.lock());
    stdout.write_all(b"\x1b[?1049h")?; // enter alternate screen
    stdout.write_all(b"\x1b[?25l")?; // hide cursor
    stdout.write_all(b"\x1b[2J\x1b[H")?; // clear, cursor home

    let mut render_buf = Vec::with_capacity(frame.data.len() * 4);
    render_frame(&frame, &mut render_buf);
    stdout.write_all(&render_buf)?;

    write!(
        stdout,
        "\r\n{} {}x{} - press any key to exit",
        array.name, array.grid.width, array.grid.height
    )?;
    stdout.flush()?;

    // Any key closes the viewer.
    loop {
        if let Event::Key(_) = event::read()? {
            break;
        }
    }

    stdout.write_all(b"\x1b[0m")?; // reset colors
    stdout.write_all(b"\x1b[?25h")?; // show cursor
    stdout.write_all(b"\x1b[?1049l")?; // leave alternate screen
    stdout.flush()?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn cleanup_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(b"\x1b[0m\x1b[?25h\x1b[?1049l")?;
    stdout.flush()?;
    let _ = terminal::disable_raw_mode();
    Ok(())
}
