//! Summary of a finished animation run

use crate::automaton::UpdateMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What an animation run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSummary {
    /// Frames stepped by the driver
    pub frames: u64,
    /// Frames handed to the exporter
    pub exported_frames: u64,
    /// Whether the logo was sampled; false means the run animated the random fill
    pub logo_loaded: bool,
    /// Logo cells still differing from the snapshot at the end
    pub final_mismatch: Option<usize>,
    pub converged: bool,
    pub living_cells: usize,
    pub update_mode: UpdateMode,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl AnimationSummary {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for AnimationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Animation Summary:")?;
        writeln!(f, "  Frames: {}", self.frames)?;
        writeln!(f, "  Exported: {}", self.exported_frames)?;
        writeln!(f, "  Update mode: {:?}", self.update_mode)?;
        writeln!(f, "  Living cells: {}", self.living_cells)?;
        if self.logo_loaded {
            writeln!(f, "  Logo mismatch: {}", self.final_mismatch.unwrap_or(0))?;
            writeln!(f, "  Converged: {}", if self.converged { "yes" } else { "no" })?;
        } else {
            writeln!(f, "  Logo: not loaded (random fill)")?;
        }
        write!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnimationSummary {
        AnimationSummary {
            frames: 160,
            exported_frames: 145,
            logo_loaded: true,
            final_mismatch: Some(3),
            converged: false,
            living_cells: 400,
            update_mode: UpdateMode::InPlace,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_json_skips_elapsed() {
        let json = summary().to_json().unwrap();
        assert!(json.contains("\"exported_frames\": 145"));
        assert!(json.contains("\"update_mode\": \"in_place\""));
        assert!(!json.contains("elapsed"));
    }

    #[test]
    fn test_display() {
        let text = summary().to_string();
        assert!(text.contains("Logo mismatch: 3"));
        assert!(text.contains("Elapsed: 1.500s"));

        let degraded = AnimationSummary {
            logo_loaded: false,
            final_mismatch: None,
            ..summary()
        };
        assert!(degraded.to_string().contains("random fill"));
    }
}
