//! Sprite-sheet input.
//!
//! Sheets are described as pixel-index grids: a text file with one row per
//! line and one sprite index per whitespace-separated cell. Every cell
//! belongs to exactly one sprite.

use std::{fs, path::Path};

use anyhow::Context as _;
use spritepack_packing::SpriteSheet;

/// Parses an index-grid text. Blank lines are ignored; all remaining rows
/// must have the same number of cells.
pub fn parse_index_sheet(text: &str) -> anyhow::Result<SpriteSheet> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u8>().with_context(|| {
                    format!(
                        "Invalid sprite index {token:?} on line {}",
                        line_index + 1
                    )
                })
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;
        rows.push(row);
    }

    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    anyhow::ensure!(
        rows.iter().all(|row| row.len() == width),
        "all rows of the index grid must have the same length"
    );

    let cells = rows.concat();
    Ok(SpriteSheet::from_index_grid(width, height, &cells)?)
}

pub fn load_index_sheet(path: &Path) -> anyhow::Result<SpriteSheet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sheet file: {}", path.display()))?;
    parse_index_sheet(&text)
        .with_context(|| format!("Failed to parse sheet file: {}", path.display()))
}

/// Four rectangular sprites on a 6x4 grid, used when no sheet file is given.
pub fn default_sheet() -> SpriteSheet {
    #[rustfmt::skip]
    let indexes = [
        0, 0, 1, 1, 2, 2,
        0, 0, 1, 1, 2, 2,
        3, 3, 3, 3, 2, 2,
        3, 3, 3, 3, 2, 2,
    ];
    SpriteSheet::from_index_grid(6, 4, &indexes).expect("built-in sheet is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_sheet() {
        let sheet = parse_index_sheet("0 0 1\n0 0 1\n\n2 2 2\n").unwrap();
        assert_eq!(sheet.len(), 3);
        let sprites = sheet.sprites();
        assert_eq!((sprites[0].width(), sprites[0].height()), (2, 2));
        assert_eq!((sprites[1].width(), sprites[1].height()), (1, 2));
        assert_eq!((sprites[2].width(), sprites[2].height()), (3, 1));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(parse_index_sheet("0 0 1\n0 0\n").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_cells() {
        let err = parse_index_sheet("0 x 1\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_rejects_index_gaps() {
        assert!(parse_index_sheet("0 0 2\n").is_err());
    }

    #[test]
    fn test_default_sheet_is_valid() {
        let sheet = default_sheet();
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.packing_bounds(), (10, 10));
    }
}
