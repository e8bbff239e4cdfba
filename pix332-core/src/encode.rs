use std::io::Write;

use anyhow::bail;

use crate::format::Rgb332Grid;

/// Write a grid as a C array declaration:
///
/// ```text
/// const uint8_t name [H][W] = {
///  {224, 28},
///  {3  , 255} };
/// ```
///
/// Every value except the last in its row is left-aligned in three columns
/// so the commas line up; the final row closes the declaration with `} };`
/// and no trailing newline. Identical grids and names produce identical
/// bytes.
pub fn write_c_array(out: &mut impl Write, grid: &Rgb332Grid, name: &str) -> anyhow::Result<()> {
    if grid.width == 0 || grid.height == 0 {
        bail!("cannot serialize an empty {}x{} grid", grid.width, grid.height);
    }
    if grid.pixels.len() != grid.width as usize * grid.height as usize {
        bail!(
            "grid holds {} pixels, expected {} for {}x{}",
            grid.pixels.len(),
            grid.width as usize * grid.height as usize,
            grid.width,
            grid.height
        );
    }

    writeln!(out, "const uint8_t {} [{}][{}] = {{", name, grid.height, grid.width)?;
    let last_row = grid.height as usize - 1;
    for (i, row) in grid.rows().enumerate() {
        out.write_all(b" {")?;
        let last_col = row.len() - 1;
        for (j, v) in row.iter().enumerate() {
            if j < last_col {
                write!(out, "{v:<3}, ")?;
            } else {
                write!(out, "{v}")?;
            }
        }
        if i < last_row {
            out.write_all(b"},\n")?;
        } else {
            out.write_all(b"} };")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(grid: &Rgb332Grid, name: &str) -> String {
        let mut buf = Vec::new();
        write_c_array(&mut buf, grid, name).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn golden_two_by_two() {
        let grid = Rgb332Grid {
            width: 2,
            height: 2,
            pixels: vec![224, 28, 3, 255],
        };
        assert_eq!(
            render(&grid, "sprite"),
            "const uint8_t sprite [2][2] = {\n {224, 28},\n {3  , 255} };"
        );
    }

    #[test]
    fn golden_single_pixel() {
        let grid = Rgb332Grid {
            width: 1,
            height: 1,
            pixels: vec![7],
        };
        assert_eq!(render(&grid, "dot"), "const uint8_t dot [1][1] = {\n {7} };");
    }

    #[test]
    fn values_pad_to_three_columns_except_row_tail() {
        let grid = Rgb332Grid {
            width: 3,
            height: 1,
            pixels: vec![5, 42, 7],
        };
        assert_eq!(
            render(&grid, "strip"),
            "const uint8_t strip [1][3] = {\n {5  , 42 , 7} };"
        );
    }

    #[test]
    fn output_has_no_trailing_newline() {
        let grid = Rgb332Grid {
            width: 2,
            height: 1,
            pixels: vec![0, 0],
        };
        assert!(render(&grid, "x").ends_with("} };"));
    }

    #[test]
    fn rejects_shape_mismatch() {
        let grid = Rgb332Grid {
            width: 2,
            height: 2,
            pixels: vec![1, 2, 3],
        };
        assert!(write_c_array(&mut Vec::new(), &grid, "bad").is_err());
        let empty = Rgb332Grid {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert!(write_c_array(&mut Vec::new(), &empty, "bad").is_err());
    }
}
