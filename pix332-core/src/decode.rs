use anyhow::{bail, Context};

use crate::format::{CArray, Rgb332Grid};

/// Parse an array declaration produced by [`crate::encode::write_c_array`]
/// back into its name and pixel grid.
///
/// The grammar is: an identifier before the first `[`, two bracketed
/// dimensions `[rows][cols]`, then after `=` one brace-delimited row of
/// comma-separated byte values per declared row. Whitespace between tokens
/// is insignificant. Row counts, row lengths and the 0-255 value range are
/// all validated against the declaration.
pub fn parse_c_array(src: &str) -> anyhow::Result<CArray> {
    let eq = src.find('=').context("not an array declaration: missing '='")?;
    let (head, body) = src.split_at(eq);

    let bracket = head.find('[').context("missing [rows][cols] dimensions")?;
    let name = head[..bracket]
        .split_whitespace()
        .last()
        .context("missing array name")?
        .to_string();

    let dim_tokens: Vec<&str> = head[bracket..]
        .split(['[', ']'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if dim_tokens.len() != 2 {
        bail!("expected two dimensions, found {}", dim_tokens.len());
    }
    let height: usize = dim_tokens[0].parse().context("row count is not a number")?;
    let width: usize = dim_tokens[1].parse().context("column count is not a number")?;
    if height == 0 || width == 0 {
        bail!("declared dimensions must be positive");
    }

    // Row values live at brace depth 2: the outer brace opens the
    // initializer, each inner pair delimits one row.
    let mut rows: Vec<Vec<u8>> = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in body.chars() {
        match c {
            '{' => {
                depth += 1;
                if depth > 2 {
                    bail!("unexpected nested brace in row {}", rows.len());
                }
                if depth == 2 {
                    current.clear();
                }
            }
            '}' => {
                if depth == 0 {
                    bail!("unbalanced braces");
                }
                if depth == 2 {
                    rows.push(parse_row(&current, rows.len())?);
                }
                depth -= 1;
            }
            _ if depth == 2 => current.push(c),
            _ => {}
        }
    }
    if depth != 0 {
        bail!("unbalanced braces");
    }

    if rows.len() != height {
        bail!("declared {height} rows, found {}", rows.len());
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            bail!("row {i} has {} values, expected {width}", row.len());
        }
    }

    let pixels = rows.into_iter().flatten().collect();
    Ok(CArray {
        name,
        grid: Rgb332Grid {
            width: width as u32,
            height: height as u32,
            pixels,
        },
    })
}

fn parse_row(text: &str, row: usize) -> anyhow::Result<Vec<u8>> {
    text.split(',')
        .map(|v| {
            let v = v.trim();
            v.parse::<u8>()
                .with_context(|| format!("row {row} holds invalid pixel value {v:?}"))
        })
        .collect()
}
