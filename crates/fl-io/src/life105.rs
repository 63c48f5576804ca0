//! Life 1.05 pattern files.
//!
//! Rows of `*` (alive) and `.` (dead). Lines starting with `#` are comments,
//! except `#P x y`, which starts a new block with its top-left corner at
//! `(x, y)` relative to the load origin. Empty lines are ignored; a line of
//! spaces is an all-dead row.

use std::collections::BTreeSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use fl_core::{Bounds, Coord};

use crate::error::{IoError, Result};

pub const HEADER: &str = "#Life 1.05";

fn out_of_range(line: usize) -> IoError {
    IoError::Parse {
        line,
        message: "#P offset out of range".to_string(),
    }
}

fn parse_block_origin(rest: &str, line: usize) -> Result<(i64, i64)> {
    let mut parts = rest.split_whitespace();
    let mut next = |axis: &str| -> Result<i64> {
        let token = parts.next().ok_or_else(|| IoError::Parse {
            line,
            message: format!("#P is missing the {axis} offset"),
        })?;
        token.parse().map_err(|_| IoError::Parse {
            line,
            message: format!("#P {axis} offset is not an integer: {token:?}"),
        })
    };
    let x = next("x")?;
    let y = next("y")?;
    Ok((x, y))
}

/// Read a pattern, placing the origin at `(x0, y0)`.
///
/// Coordinates that would leave the `i64` range are a parse error on the
/// line that produced them.
pub fn read_life105(x0: i64, y0: i64, reader: impl BufRead) -> Result<BTreeSet<Coord>> {
    let mut cells = BTreeSet::new();
    let mut block_x = x0;
    let mut y = Some(y0);

    for (idx, raw) in reader.lines().enumerate() {
        let raw = raw.map_err(IoError::Stream)?;
        let line_no = idx + 1;
        let line = raw.trim_end_matches(['\r', '\n']);
        if let Some(rest) = line.strip_prefix("#P")
            && rest.starts_with(char::is_whitespace)
        {
            let (px, py) = parse_block_origin(rest, line_no)?;
            block_x = x0.checked_add(px).ok_or_else(|| out_of_range(line_no))?;
            y = Some(y0.checked_add(py).ok_or_else(|| out_of_range(line_no))?);
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // `None` once the previous row was i64::MAX.
        let row = y.ok_or_else(|| out_of_range(line_no))?;
        for (i, ch) in line.chars().enumerate() {
            if ch == '*' {
                let x = i64::try_from(i)
                    .ok()
                    .and_then(|i| block_x.checked_add(i))
                    .ok_or_else(|| out_of_range(line_no))?;
                cells.insert(Coord::new(x, row));
            }
        }
        y = row.checked_add(1);
    }
    Ok(cells)
}

/// Write cells as a single-block Life 1.05 document.
pub fn write_life105(cells: &BTreeSet<Coord>, mut writer: impl Write) -> Result<()> {
    let bounds = Bounds::of(cells).ok_or(IoError::EmptyPattern)?;
    writeln!(writer, "{HEADER}").map_err(IoError::Stream)?;
    writeln!(writer, "#P {} {}", bounds.min.x, bounds.min.y).map_err(IoError::Stream)?;
    for y in bounds.min.y..=bounds.max.y {
        let mut row: String = (bounds.min.x..=bounds.max.x)
            .map(|x| {
                if cells.contains(&Coord::new(x, y)) {
                    '*'
                } else {
                    '.'
                }
            })
            .collect();
        row.push('\n');
        writer.write_all(row.as_bytes()).map_err(IoError::Stream)?;
    }
    writer.flush().map_err(IoError::Stream)
}

pub fn read_life105_file(x0: i64, y0: i64, path: &Path) -> Result<BTreeSet<Coord>> {
    let text = fs::read_to_string(path).map_err(|e| IoError::io(path, e))?;
    let cells = read_life105(x0, y0, text.as_bytes())?;
    tracing::debug!("read {} cells from {}", cells.len(), path.display());
    Ok(cells)
}

pub fn write_life105_file(cells: &BTreeSet<Coord>, path: &Path) -> Result<()> {
    let mut text = Vec::new();
    write_life105(cells, &mut text)?;
    fs::write(path, text).map_err(|e| IoError::io(path, e))?;
    tracing::debug!("wrote {} cells to {}", cells.len(), path.display());
    Ok(())
}
