//! Text representation of grids

use super::{Cell, Grid};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
/// Format: each line is a row, one digit per cell ('0', '1' or '2')
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its digit representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid text is empty or contains no valid rows");
    }

    let mut cells = Vec::with_capacity(lines.len());
    for (y, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(x, ch)| {
                ch.to_digit(10)
                    .and_then(|digit| Cell::try_from(digit as u8).ok())
                    .with_context(|| {
                        format!("Invalid character '{}' at ({}, {}). Only '0', '1' and '2' are allowed", ch, x, y)
                    })
            })
            .collect::<Result<Vec<Cell>>>()?;
        cells.push(row);
    }

    Ok(Grid::from_cells(cells)?)
}

/// Save a grid as text
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its digit representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            result.push(grid.get(x, y).digit());
        }
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let grid = parse_grid_from_string("010\n121\n010\n").unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.get(1, 1), Cell::FarForeground);
        assert_eq!(grid.get(0, 1), Cell::Foreground);
        assert_eq!(grid.get(0, 0), Cell::Background);
    }

    #[test]
    fn test_grid_to_string() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, Cell::Foreground).unwrap();
        grid.set(2, 1, Cell::FarForeground).unwrap();

        assert_eq!(grid_to_string(&grid), "100\n002\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("frames/grid.txt");

        let original = parse_grid_from_string("0120\n2100\n").unwrap();
        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_grid_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());
        assert!(parse_grid_from_string("010\n131\n010\n").is_err());
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());
        assert!(parse_grid_from_string("").is_err());
    }
}
