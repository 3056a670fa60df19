//! Toroidal cell grid and neighbor queries

use super::cell::Cell;
use super::error::AutomatonError;
use itertools::iproduct;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the Moore neighborhood, centre excluded
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Wrap a possibly negative coordinate onto `0..n`.
///
/// Equivalent to `((a % n) + n) % n`.
#[inline]
pub fn wrap(a: isize, n: usize) -> usize {
    a.rem_euclid(n as isize) as usize
}

/// A `width x height` grid of cells with wraparound edges.
///
/// Cells are stored row-major and addressed as `(x, y)` with `x < width`.
/// The cell vector always holds exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData", into = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Serialized form of a grid, checked on the way back in
#[derive(Serialize, Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = AutomatonError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        Grid::from_flat(data.width, data.height, data.cells)
    }
}

impl From<Grid> for GridData {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

/// Smallest side length the animation accepts
pub const MIN_ANIMATED_SIDE: usize = 3;

impl Grid {
    /// Create a grid filled with `Background`
    pub fn new(width: usize, height: usize) -> Result<Self, AutomatonError> {
        Self::filled(width, height, Cell::Background)
    }

    /// Create a grid where every cell has the same value
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, AutomatonError> {
        Self::from_flat(width, height, vec![cell; width * height])
    }

    /// Create a grid of random Background/Foreground cells, each Foreground with probability `density`
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, AutomatonError> {
        let mut grid = Self::new(width, height)?;
        for cell in grid.cells.iter_mut() {
            if rng.random::<f64>() < density {
                *cell = Cell::Foreground;
            }
        }
        Ok(grid)
    }

    /// Create a grid from row-major cells
    pub fn from_flat(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, AutomatonError> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::EmptyGrid { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(AutomatonError::CellCount {
                len: cells.len(),
                expected,
                width,
                height,
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Create a grid from rows of cells (`cells[y][x]`)
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, AutomatonError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(AutomatonError::EmptyGrid { width, height });
        }

        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(AutomatonError::RaggedRow {
                    row,
                    len: line.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell value at `(x, y)`; coordinates must be inside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Bounds-checked write
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), AutomatonError> {
        if x >= self.width || y >= self.height {
            return Err(AutomatonError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Write a cell the caller already knows is in range, returning whether it changed
    #[inline]
    pub fn replace(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        let idx = self.index(x, y);
        let changed = self.cells[idx] != cell;
        self.cells[idx] = cell;
        changed
    }

    /// The eight wrapped neighbor positions of `(x, y)`
    pub fn neighbor_positions(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            (
                wrap(x as isize + dx, self.width),
                wrap(y as isize + dy, self.height),
            )
        })
    }

    /// Count neighbors of `(x, y)` whose value satisfies `predicate`
    pub fn count_neighbors<F>(&self, x: usize, y: usize, predicate: F) -> u8
    where
        F: Fn(Cell) -> bool,
    {
        self.neighbor_positions(x, y)
            .iter()
            .filter(|&&(nx, ny)| predicate(self.get(nx, ny)))
            .count() as u8
    }

    /// Count living neighbors of `(x, y)`
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.count_neighbors(x, y, Cell::is_alive)
    }

    /// All coordinates, row by row
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(0..self.height, 0..self.width).map(|(y, x)| (x, y))
    }

    /// Column-major order, `x` outer and `y` inner, in which `step` visits cells.
    ///
    /// In-place updates read earlier writes, so this order is part of the animation's look.
    pub fn scan_order(&self) -> impl Iterator<Item = (usize, usize)> + 'static {
        iproduct!(0..self.width, 0..self.height)
    }

    /// The integer-floor centre cell
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Number of cells holding `value`
    pub fn count(&self, value: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }

    /// Number of living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Fail when the grid is too small for its eight wrapped neighbors to be distinct
    pub fn ensure_animatable(&self) -> Result<(), AutomatonError> {
        if self.width < MIN_ANIMATED_SIDE || self.height < MIN_ANIMATED_SIDE {
            return Err(AutomatonError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of cells whose value differs from `other`; grids must share dimensions
    pub fn diff_count(&self, other: &Grid) -> usize {
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail unless `other` has exactly this grid's dimensions
    pub fn ensure_same_dimensions(&self, other: &Grid) -> Result<(), AutomatonError> {
        if self.same_dimensions(other) {
            Ok(())
        } else {
            Err(AutomatonError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: other.width,
                height: other.height,
            })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = match self.get(x, y) {
                    Cell::Background => "⬛",
                    Cell::Foreground => "⬜",
                    Cell::FarForeground => "🟪",
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
