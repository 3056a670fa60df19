//! Configuration settings for the logo animation

use crate::automaton::grid::MIN_ANIMATED_SIDE;
use crate::automaton::{Schedule, UpdateMode};
use crate::logo::Palette;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub animation: AnimationConfig,
    pub input: InputConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Probability that a cell of the initial random fill is Foreground
    pub initial_density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub update_mode: UpdateMode,
    pub total_frames: u64,
    pub frame_interval_ms: u64,
    /// Wrap the phase clock every `loop_period` frames
    #[serde(default)]
    pub loop_period: Option<u64>,
    pub phases: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub logo_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub palette: Palette,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Frames are exported while the frame index is below this
    pub export_frames: u64,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 30,
                height: 30,
                initial_density: 0.5,
            },
            animation: AnimationConfig {
                seed: None,
                update_mode: UpdateMode::InPlace,
                total_frames: 160,
                frame_interval_ms: 300,
                loop_period: None,
                phases: Schedule::default(),
            },
            input: InputConfig {
                logo_file: PathBuf::from("assets/logo.png"),
            },
            render: RenderConfig {
                canvas_width: 512,
                canvas_height: 512,
                palette: Palette::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Png,
                export_frames: 145,
                output_directory: PathBuf::from("output/frames"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    ///
    /// A missing logo file is allowed: the animation then runs on its random fill.
    pub fn validate(&self) -> Result<()> {
        if self.grid.width < MIN_ANIMATED_SIDE || self.grid.height < MIN_ANIMATED_SIDE {
            anyhow::bail!(
                "Grid must be at least 3x3, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if !(0.0..=1.0).contains(&self.grid.initial_density) {
            anyhow::bail!("Initial density must be within [0, 1], got {}", self.grid.initial_density);
        }

        if self.animation.total_frames == 0 {
            anyhow::bail!("Number of frames must be positive");
        }

        if self.animation.loop_period == Some(0) {
            anyhow::bail!("Loop period must be positive when set");
        }

        if (self.render.canvas_width as usize) < self.grid.width
            || (self.render.canvas_height as usize) < self.grid.height
        {
            anyhow::bail!(
                "Canvas {}x{} is smaller than the {}x{} grid",
                self.render.canvas_width,
                self.render.canvas_height,
                self.grid.width,
                self.grid.height
            );
        }

        for window in &self.animation.phases.windows {
            if let Some(end) = window.end {
                if end < window.start {
                    anyhow::bail!(
                        "Phase '{}' ends at {} before it starts at {}",
                        window.name,
                        end,
                        window.start
                    );
                }
            }

            if let Some(bad) = window
                .effect
                .parameters()
                .into_iter()
                .find(|p| !p.is_finite() || *p < 0.0)
            {
                anyhow::bail!("Phase '{}' has an invalid probability {}", window.name, bad);
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(frames) = cli_overrides.frames {
            self.animation.total_frames = frames;
        }
        if let Some(seed) = cli_overrides.seed {
            self.animation.seed = Some(seed);
        }
        if let Some(mode) = cli_overrides.update_mode {
            self.animation.update_mode = mode;
        }
        if let Some(ref logo_file) = cli_overrides.logo_file {
            self.input.logo_file = logo_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub frames: Option<u64>,
    pub seed: Option<u64>,
    pub update_mode: Option<UpdateMode>,
    pub logo_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}
