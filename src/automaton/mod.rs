//! Cellular automaton core: grid state, life rule, phase table and engine

pub mod cell;
pub mod clock;
pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod phases;
pub mod rules;

pub use cell::Cell;
pub use clock::Clock;
pub use engine::{PhasedAutomaton, StepReport, UpdateMode};
pub use error::AutomatonError;
pub use grid::{wrap, Grid};
pub use io::{grid_to_string, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use phases::{Effect, PhaseWindow, Schedule};
pub use rules::LifeRule;
