//! Logo Life
//!
//! A stochastic Game of Life variant that dissolves a sampled logo into noise
//! and regrows it, following a frame-indexed phase table.

pub mod animation;
pub mod automaton;
pub mod config;
pub mod logo;
pub mod render;
pub mod utils;

pub use animation::{Animation, AnimationSummary};
pub use automaton::{Cell, Grid, PhasedAutomaton};
pub use config::Settings;

use anyhow::Result;

/// Main entry point for running a logo animation
pub fn run_animation(settings: Settings) -> Result<AnimationSummary> {
    let mut animation = Animation::new(settings)?;
    animation.run()
}
