//! Time-windowed effects that make up the dissolve/regrow choreography

use super::rules::{neighbors_of, roll, LifeRule};
use super::{Cell, Grid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An effect applied while its window is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// One or more stochastic life-rule passes per cell, in order
    Life { passes: Vec<LifeRule> },
    /// Flip non-Foreground cells to Foreground with `chance + per_neighbor * living neighbors`
    Flood {
        chance: f64,
        #[serde(default)]
        per_neighbor: f64,
    },
    /// Force the centre cell to Background once per frame
    Seed,
    /// Flip cells to Background with `rate * background neighbors`
    BackgroundRegrowth { rate: f64 },
    /// Restore non-Background logo cells with `rate * (1 + living neighbors)`
    LogoRegrowth { rate: f64 },
}

impl Effect {
    /// Whether the effect runs once per frame instead of once per cell
    pub fn is_frame_effect(&self) -> bool {
        matches!(self, Effect::Seed)
    }

    /// Apply a frame effect to the grid, returning the number of changed cells
    pub fn apply_frame(&self, grid: &mut Grid) -> usize {
        match self {
            Effect::Seed => {
                let (cx, cy) = grid.center();
                usize::from(grid.replace(cx, cy, Cell::Background))
            }
            _ => 0,
        }
    }

    /// Apply a per-cell effect to `(x, y)`, returning whether the cell changed
    pub fn apply_cell<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        frozen: Option<&Grid>,
        snapshot: &Grid,
        x: usize,
        y: usize,
        rng: &mut R,
    ) -> bool {
        match *self {
            Effect::Life { ref passes } => passes
                .iter()
                .fold(false, |changed, pass| pass.apply(grid, frozen, x, y, rng) | changed),
            Effect::Flood { chance, per_neighbor } => {
                if grid.get(x, y) == Cell::Foreground {
                    return false;
                }
                let neighbors = if per_neighbor == 0.0 {
                    0
                } else {
                    neighbors_of(grid, frozen, x, y, Cell::is_alive)
                };
                roll(rng, chance + per_neighbor * f64::from(neighbors))
                    && grid.replace(x, y, Cell::Foreground)
            }
            Effect::Seed => false,
            Effect::BackgroundRegrowth { rate } => {
                let neighbors = neighbors_of(grid, frozen, x, y, |cell| cell == Cell::Background);
                roll(rng, rate * f64::from(neighbors)) && grid.replace(x, y, Cell::Background)
            }
            Effect::LogoRegrowth { rate } => {
                let target = snapshot.get(x, y);
                if target == Cell::Background {
                    return false;
                }
                let neighbors = neighbors_of(grid, frozen, x, y, Cell::is_alive);
                roll(rng, rate * (1.0 + f64::from(neighbors))) && grid.replace(x, y, target)
            }
        }
    }

    /// Every probability-like parameter of the effect
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            Effect::Life { passes } => passes.iter().map(|pass| pass.chance).collect(),
            Effect::Flood { chance, per_neighbor } => vec![*chance, *per_neighbor],
            Effect::Seed => Vec::new(),
            Effect::BackgroundRegrowth { rate } | Effect::LogoRegrowth { rate } => vec![*rate],
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Life { passes } => {
                write!(f, "life")?;
                for pass in passes {
                    let mode = match (pass.die, pass.birth) {
                        (true, true) => "die+birth",
                        (true, false) => "die",
                        (false, true) => "birth",
                        (false, false) => "inert",
                    };
                    write!(f, " [{:.2} {}]", pass.chance, mode)?;
                }
                Ok(())
            }
            Effect::Flood { chance, per_neighbor } => {
                write!(f, "flood {:.2} + {:.2}/neighbor", chance, per_neighbor)
            }
            Effect::Seed => write!(f, "seed centre"),
            Effect::BackgroundRegrowth { rate } => write!(f, "background regrowth {:.2}/neighbor", rate),
            Effect::LogoRegrowth { rate } => write!(f, "logo regrowth {:.2} x (1 + neighbors)", rate),
        }
    }
}

/// A named effect active for clock values in `start..=end` (`end = None` never closes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub name: String,
    pub start: u64,
    #[serde(default)]
    pub end: Option<u64>,
    pub effect: Effect,
}

impl PhaseWindow {
    pub fn new(name: impl Into<String>, start: u64, end: Option<u64>, effect: Effect) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            effect,
        }
    }

    /// Whether the window covers clock value `t`
    pub fn contains(&self, t: u64) -> bool {
        t >= self.start && self.end.map_or(true, |end| t <= end)
    }
}

/// Ordered phase table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub windows: Vec<PhaseWindow>,
}

impl Schedule {
    pub fn new(windows: Vec<PhaseWindow>) -> Self {
        Self { windows }
    }

    /// Windows active at clock value `t`, in table order
    pub fn active(&self, t: u64) -> impl Iterator<Item = &PhaseWindow> {
        self.windows.iter().filter(move |window| window.contains(t))
    }

    /// First clock value after which the active set never changes again
    pub fn settles_at(&self) -> u64 {
        self.windows
            .iter()
            .map(|window| match window.end {
                Some(end) => end + 1,
                None => window.start,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}

impl Default for Schedule {
    /// The logo dissolve and regrow choreography
    fn default() -> Self {
        Self::new(vec![
            PhaseWindow::new("slow_decay", 6, Some(19), Effect::Life {
                passes: vec![LifeRule::new(0.1)],
            }),
            PhaseWindow::new("fast_decay", 21, Some(39), Effect::Life {
                passes: vec![LifeRule::new(0.3)],
            }),
            PhaseWindow::new("fill", 41, Some(89), Effect::Life {
                passes: vec![LifeRule::death_only(0.3), LifeRule::birth_only(0.7)],
            }),
            PhaseWindow::new("flood", 91, Some(109), Effect::Flood {
                chance: 0.3,
                per_neighbor: 0.0,
            }),
            PhaseWindow::new("seed", 111, Some(111), Effect::Seed),
            PhaseWindow::new("background_regrowth", 111, Some(134), Effect::BackgroundRegrowth {
                rate: 0.15,
            }),
            PhaseWindow::new("logo_regrowth", 136, None, Effect::LogoRegrowth { rate: 0.1 }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const B: Cell = Cell::Background;
    const F: Cell = Cell::Foreground;
    const P: Cell = Cell::FarForeground;

    fn active_names(schedule: &Schedule, t: u64) -> Vec<&str> {
        schedule.active(t).map(|w| w.name.as_str()).collect()
    }

    #[test]
    fn test_default_schedule_windows() {
        let schedule = Schedule::default();

        for t in [0, 5, 20, 40, 90, 110, 135] {
            assert!(active_names(&schedule, t).is_empty(), "t = {} should be idle", t);
        }
        assert_eq!(active_names(&schedule, 6), vec!["slow_decay"]);
        assert_eq!(active_names(&schedule, 19), vec!["slow_decay"]);
        assert_eq!(active_names(&schedule, 30), vec!["fast_decay"]);
        assert_eq!(active_names(&schedule, 60), vec!["fill"]);
        assert_eq!(active_names(&schedule, 100), vec!["flood"]);
        assert_eq!(active_names(&schedule, 111), vec!["seed", "background_regrowth"]);
        assert_eq!(active_names(&schedule, 112), vec!["background_regrowth"]);
        assert_eq!(active_names(&schedule, 136), vec!["logo_regrowth"]);
        assert_eq!(active_names(&schedule, 1_000_000), vec!["logo_regrowth"]);
        assert_eq!(schedule.settles_at(), 136);
    }

    #[test]
    fn test_seed_forces_centre_only() {
        let mut grid = Grid::filled(5, 4, P).unwrap();
        assert_eq!(Effect::Seed.apply_frame(&mut grid), 1);
        assert_eq!(grid.get(2, 2), B);
        assert_eq!(grid.count(B), 1);

        // Already background: nothing changes
        assert_eq!(Effect::Seed.apply_frame(&mut grid), 0);
    }

    #[test]
    fn test_flood_skips_foreground() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut grid = Grid::from_cells(vec![vec![F, B, P], vec![B, F, B], vec![P, B, F]]).unwrap();
        let snapshot = grid.clone();
        let flood = Effect::Flood { chance: 1.0, per_neighbor: 0.0 };

        let positions: Vec<_> = grid.positions().collect();
        let changed = positions
            .into_iter()
            .filter(|&(x, y)| flood.apply_cell(&mut grid, None, &snapshot, x, y, &mut rng))
            .count();

        assert_eq!(changed, 6);
        assert_eq!(grid.count(F), 9);
    }

    #[test]
    fn test_flood_scales_with_neighbors() {
        let mut rng = SmallRng::seed_from_u64(6);
        // Isolated background cell: no living neighbors, so zero probability
        let mut grid = Grid::new(3, 3).unwrap();
        let snapshot = grid.clone();
        let flood = Effect::Flood { chance: 0.0, per_neighbor: 0.2 };
        for _ in 0..200 {
            assert!(!flood.apply_cell(&mut grid, None, &snapshot, 1, 1, &mut rng));
        }

        // Five living neighbors: probability 1.0
        let mut grid = Grid::from_cells(vec![vec![F, F, F], vec![F, B, F], vec![B, B, B]]).unwrap();
        assert!(flood.apply_cell(&mut grid, None, &snapshot, 1, 1, &mut rng));
        assert_eq!(grid.get(1, 1), F);
    }

    #[test]
    fn test_background_regrowth_needs_background_neighbors() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut grid = Grid::filled(3, 3, F).unwrap();
        let snapshot = grid.clone();
        let regrow = Effect::BackgroundRegrowth { rate: 0.15 };
        for _ in 0..200 {
            assert!(!regrow.apply_cell(&mut grid, None, &snapshot, 1, 1, &mut rng));
        }

        // Eight background neighbors: 0.15 * 8 >= 1
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, P).unwrap();
        assert!(regrow.apply_cell(&mut grid, None, &snapshot, 1, 1, &mut rng));
        assert_eq!(grid.get(1, 1), B);
    }

    #[test]
    fn test_logo_regrowth_restores_snapshot_value() {
        let mut rng = SmallRng::seed_from_u64(9);
        let snapshot = Grid::from_cells(vec![vec![B, P, B], vec![F, F, F], vec![B, B, B]]).unwrap();
        let mut grid = Grid::new(3, 3).unwrap();
        let regrow = Effect::LogoRegrowth { rate: 1.0 };

        assert!(!regrow.apply_cell(&mut grid, None, &snapshot, 0, 0, &mut rng));
        assert!(regrow.apply_cell(&mut grid, None, &snapshot, 1, 0, &mut rng));
        assert_eq!(grid.get(1, 0), P);
        assert!(regrow.apply_cell(&mut grid, None, &snapshot, 0, 1, &mut rng));
        assert_eq!(grid.get(0, 1), F);
    }

    #[test]
    fn test_life_effect_runs_passes_in_order() {
        let mut rng = SmallRng::seed_from_u64(10);
        let mut grid = Grid::from_cells(vec![vec![F, F, B], vec![B, B, B], vec![B, F, B]]).unwrap();
        let snapshot = grid.clone();
        let fill = Effect::Life {
            passes: vec![LifeRule::death_only(1.0), LifeRule::birth_only(1.0)],
        };
        assert!(fill.apply_cell(&mut grid, None, &snapshot, 1, 1, &mut rng));
        assert_eq!(grid.get(1, 1), F);
    }

    #[test]
    fn test_schedule_yaml_shape() {
        let yaml = "\
- name: grow
  start: 3
  end: 7
  effect:
    kind: life
    passes:
      - chance: 0.5
- name: finish
  start: 8
  effect:
    kind: logo_regrowth
    rate: 0.2
";
        let schedule: Schedule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.windows[0].effect, Effect::Life { passes: vec![LifeRule::new(0.5)] });
        assert_eq!(schedule.windows[1].end, None);
        assert!(schedule.windows[1].contains(u64::MAX));
        assert_eq!(schedule.settles_at(), 8);
    }

    #[test]
    fn test_effect_display() {
        assert_eq!(Effect::Seed.to_string(), "seed centre");
        let fill = Effect::Life {
            passes: vec![LifeRule::death_only(0.3), LifeRule::birth_only(0.7)],
        };
        assert_eq!(fill.to_string(), "life [0.30 die] [0.70 birth]");
    }
}
