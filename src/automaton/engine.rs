//! Phased automaton engine

use super::clock::Clock;
use super::error::AutomatonError;
use super::phases::{PhaseWindow, Schedule};
use super::Grid;
use crate::config::Settings;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How neighbor reads relate to writes within one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Cells are rewritten during the scan and later cells see earlier writes
    #[default]
    InPlace,
    /// Neighbor counts come from a copy of the grid taken once per frame, before the cell scan
    Generational,
}

/// What a single `step` did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub frame: u64,
    pub phase_time: u64,
    pub phases: Vec<String>,
    pub changed_cells: usize,
    pub logo_loaded: bool,
}

/// Owns the grid, the logo snapshot and the clock, and advances them one frame at a time
#[derive(Debug, Clone)]
pub struct PhasedAutomaton {
    grid: Grid,
    snapshot: Option<Grid>,
    schedule: Schedule,
    mode: UpdateMode,
    clock: Clock,
    rng: SmallRng,
    last_phases: Vec<String>,
}

/// Seeded generator, or one seeded from entropy when no seed is configured
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::seed_from_u64(rand::random()),
    }
}

impl PhasedAutomaton {
    /// Build an engine over a random grid as described by `settings`
    pub fn new(settings: &Settings) -> Result<Self, AutomatonError> {
        let mut rng = seeded_rng(settings.animation.seed);
        let grid = Grid::random(
            settings.grid.width,
            settings.grid.height,
            settings.grid.initial_density,
            &mut rng,
        )?;
        grid.ensure_animatable()?;
        let clock = match settings.animation.loop_period {
            Some(period) => Clock::looping(period),
            None => Clock::new(),
        };

        Ok(Self {
            grid,
            snapshot: None,
            schedule: settings.animation.phases.clone(),
            mode: settings.animation.update_mode,
            clock,
            rng,
            last_phases: Vec::new(),
        })
    }

    /// Build an engine from explicit parts (useful for testing)
    pub fn with_parts(
        grid: Grid,
        schedule: Schedule,
        mode: UpdateMode,
        clock: Clock,
        seed: u64,
    ) -> Result<Self, AutomatonError> {
        grid.ensure_animatable()?;
        Ok(Self {
            grid,
            snapshot: None,
            schedule,
            mode,
            clock,
            rng: SmallRng::seed_from_u64(seed),
            last_phases: Vec::new(),
        })
    }

    /// Replace the grid with a sampled logo and keep an immutable copy for regrowth
    pub fn load_logo(&mut self, logo: Grid) -> Result<(), AutomatonError> {
        self.grid.ensure_same_dimensions(&logo)?;
        info!(
            width = logo.width(),
            height = logo.height(),
            living = logo.living_count(),
            "logo loaded into grid"
        );
        self.grid = logo.clone();
        self.snapshot = Some(logo);
        Ok(())
    }

    /// Advance the animation by one frame.
    ///
    /// Until a logo is loaded the grid is left untouched and only the clock moves.
    pub fn step(&mut self) -> StepReport {
        let frame = self.clock.frame();
        let phase_time = self.clock.phase_time();

        let Some(snapshot) = self.snapshot.as_ref() else {
            self.clock.tick();
            return StepReport {
                frame,
                phase_time,
                phases: Vec::new(),
                changed_cells: 0,
                logo_loaded: false,
            };
        };

        let active: Vec<&PhaseWindow> = self.schedule.active(phase_time).collect();
        let phases: Vec<String> = active.iter().map(|window| window.name.clone()).collect();
        if phases != self.last_phases {
            info!(frame, phase_time, phases = ?phases, "active phases changed");
            self.last_phases = phases.clone();
        }

        let before = self.grid.clone();

        for window in active.iter().filter(|window| window.effect.is_frame_effect()) {
            window.effect.apply_frame(&mut self.grid);
        }

        // Frozen after frame effects so the cell scan sees this frame's seed in both modes
        let frozen_copy = match self.mode {
            UpdateMode::InPlace => None,
            UpdateMode::Generational => Some(self.grid.clone()),
        };
        let frozen = frozen_copy.as_ref();

        let cell_effects: Vec<_> = active
            .iter()
            .map(|window| &window.effect)
            .filter(|effect| !effect.is_frame_effect())
            .collect();

        if !cell_effects.is_empty() {
            for (x, y) in self.grid.scan_order() {
                for effect in &cell_effects {
                    effect.apply_cell(&mut self.grid, frozen, snapshot, x, y, &mut self.rng);
                }
            }
        }

        let changed_cells = before.diff_count(&self.grid);

        debug!(frame, phase_time, changed_cells, "step complete");
        self.clock.tick();

        StepReport {
            frame,
            phase_time,
            phases,
            changed_cells,
            logo_loaded: true,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The logo as sampled, if one has been loaded
    pub fn snapshot(&self) -> Option<&Grid> {
        self.snapshot.as_ref()
    }

    pub fn is_logo_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Cells where the logo is non-Background but the grid differs from it
    pub fn mismatch_count(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|snapshot| {
            snapshot
                .cells()
                .iter()
                .zip(self.grid.cells())
                .filter(|(logo, cell)| logo.is_alive() && logo != cell)
                .count()
        })
    }

    /// Whether every logo cell has been restored
    pub fn has_converged(&self) -> bool {
        self.mismatch_count() == Some(0)
    }
}
