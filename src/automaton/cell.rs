//! Cell values of the logo grid

use super::error::AutomatonError;
use serde::{Deserialize, Serialize};

/// One grid element.
///
/// `Background` and `Foreground` drive the life rules (alive = value > 0).
/// `FarForeground` is a second foreground shade that only matters when the
/// logo regrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Cell {
    #[default]
    Background = 0,
    Foreground = 1,
    FarForeground = 2,
}

impl Cell {
    /// All cell values in numeric order
    pub const ALL: [Cell; 3] = [Cell::Background, Cell::Foreground, Cell::FarForeground];

    /// A cell is alive when its value is non-zero
    #[inline]
    pub fn is_alive(self) -> bool {
        self != Cell::Background
    }

    /// Numeric value of the cell
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Single-digit representation used by text frames
    pub fn digit(self) -> char {
        match self {
            Cell::Background => '0',
            Cell::Foreground => '1',
            Cell::FarForeground => '2',
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = AutomatonError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Background),
            1 => Ok(Cell::Foreground),
            2 => Ok(Cell::FarForeground),
            other => Err(AutomatonError::InvalidCell(other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}
