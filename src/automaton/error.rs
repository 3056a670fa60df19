//! Error types for the automaton core

use thiserror::Error;

/// Errors raised by grid construction, sampling and logo loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A grid must have at least one row and one column
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// Two grids that must line up cell-for-cell do not
    #[error("dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    /// Below 3x3 the eight wrapped neighbors are no longer distinct cells
    #[error("grid must be at least 3x3 to animate, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    /// A flat cell array whose length is not width * height
    #[error("grid holds {len} cells, expected {expected} for {width}x{height}")]
    CellCount {
        len: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    /// A row in a 2D cell array has the wrong length
    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    /// The RGBA buffer does not hold width * height * 4 bytes
    #[error("pixel buffer holds {len} bytes, expected {expected} for a {width}x{height} RGBA image")]
    PixelBufferSize {
        len: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    /// Checked writes outside the grid
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A raw value outside the cell alphabet
    #[error("invalid cell value {0}, expected 0, 1 or 2")]
    InvalidCell(u8),
}
