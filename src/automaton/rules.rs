//! Stochastic Game of Life rule with toggleable death and birth

use super::{Cell, Grid};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Returns true with probability `p`; values above 1 always succeed and values at or below 0 never do
#[inline]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}

/// Count neighbors of `(x, y)` from the frozen frame copy when one exists, otherwise from the live grid
#[inline]
pub(crate) fn neighbors_of<F>(grid: &Grid, frozen: Option<&Grid>, x: usize, y: usize, predicate: F) -> u8
where
    F: Fn(Cell) -> bool,
{
    frozen.unwrap_or(grid).count_neighbors(x, y, predicate)
}

fn enabled() -> bool {
    true
}

/// One stochastic pass of Conway's death/birth logic.
///
/// With probability `chance` the cell is evaluated: a living cell with fewer
/// than two or more than three living neighbors dies (if `die`), a dead cell
/// with exactly three is born as `Foreground` (if `birth`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeRule {
    pub chance: f64,
    #[serde(default = "enabled")]
    pub die: bool,
    #[serde(default = "enabled")]
    pub birth: bool,
}

impl LifeRule {
    /// Classic rule with both death and birth enabled
    pub fn new(chance: f64) -> Self {
        Self { chance, die: true, birth: true }
    }

    pub fn death_only(chance: f64) -> Self {
        Self { chance, die: true, birth: false }
    }

    pub fn birth_only(chance: f64) -> Self {
        Self { chance, die: false, birth: true }
    }

    /// The value a triggered cell moves to, or `None` if it keeps its value
    pub fn transition(&self, cell: Cell, neighbors: u8) -> Option<Cell> {
        match (cell.is_alive(), neighbors) {
            (true, n) if n < 2 || n > 3 => self.die.then_some(Cell::Background),
            (false, 3) => self.birth.then_some(Cell::Foreground),
            _ => None,
        }
    }

    /// Apply the rule to one cell of `grid`, returning whether it changed
    pub fn apply<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        frozen: Option<&Grid>,
        x: usize,
        y: usize,
        rng: &mut R,
    ) -> bool {
        let cell = grid.get(x, y);
        let neighbors = neighbors_of(grid, frozen, x, y, Cell::is_alive);
        if !roll(rng, self.chance) {
            return false;
        }
        match self.transition(cell, neighbors) {
            Some(next) => grid.replace(x, y, next),
            None => false,
        }
    }

    /// A rule that never fires is a no-op
    pub fn is_inert(&self) -> bool {
        self.chance <= 0.0 || (!self.die && !self.birth)
    }
}
