//! Frame scheduler driving the engine, renderer and exporter

use super::report::AnimationSummary;
use crate::automaton::{PhasedAutomaton, StepReport};
use crate::config::Settings;
use crate::logo::load_logo_grid;
use crate::render::{exporter_for, render_into, FrameExporter};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A configured animation run
pub struct Animation {
    settings: Settings,
    engine: PhasedAutomaton,
    exporter: Option<Box<dyn FrameExporter>>,
    canvas: RgbaImage,
    realtime: bool,
}

impl Animation {
    /// Create an animation from settings.
    ///
    /// If the logo cannot be loaded the run continues on the random fill.
    pub fn new(settings: Settings) -> Result<Self> {
        let mut engine = PhasedAutomaton::new(&settings).context("Failed to create automaton")?;

        match load_logo_grid(
            &settings.input.logo_file,
            settings.render.canvas_width,
            settings.render.canvas_height,
            settings.grid.width,
            settings.grid.height,
            &settings.render.palette,
        ) {
            Ok(logo) => engine.load_logo(logo).context("Failed to load logo into grid")?,
            Err(e) => warn!(
                logo = %settings.input.logo_file.display(),
                error = %format!("{:#}", e),
                "logo unavailable, animating the random fill"
            ),
        }

        let exporter = if settings.output.export_frames > 0 {
            Some(exporter_for(settings.output.format, &settings.output.output_directory)?)
        } else {
            None
        };

        Ok(Self::with_engine(settings, engine, exporter))
    }

    /// Create an animation around an existing engine (useful for testing)
    pub fn with_engine(
        settings: Settings,
        engine: PhasedAutomaton,
        exporter: Option<Box<dyn FrameExporter>>,
    ) -> Self {
        let canvas = RgbaImage::new(settings.render.canvas_width, settings.render.canvas_height);
        Self {
            settings,
            engine,
            exporter,
            canvas,
            realtime: false,
        }
    }

    /// Sleep the configured frame interval between steps
    pub fn set_realtime(&mut self, realtime: bool) {
        self.realtime = realtime;
    }

    pub fn engine(&self) -> &PhasedAutomaton {
        &self.engine
    }

    /// The most recently rendered frame
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run all frames
    pub fn run(&mut self) -> Result<AnimationSummary> {
        self.run_with(|_| {})
    }

    /// Run all frames, calling `on_frame` after each step.
    ///
    /// Each frame renders the current grid, exports it while the frame index is
    /// below `export_frames`, then steps the engine.
    pub fn run_with<F>(&mut self, mut on_frame: F) -> Result<AnimationSummary>
    where
        F: FnMut(&StepReport),
    {
        let start_time = Instant::now();
        let interval = Duration::from_millis(self.settings.animation.frame_interval_ms);
        let total_frames = self.settings.animation.total_frames;
        let export_frames = self.settings.output.export_frames;
        let mut exported_frames = 0;

        info!(
            total_frames,
            export_frames,
            logo_loaded = self.engine.is_logo_loaded(),
            "starting animation"
        );

        for _ in 0..total_frames {
            let frame = self.engine.clock().frame();
            render_into(self.engine.grid(), &self.settings.render.palette, &mut self.canvas);

            if frame < export_frames {
                if let Some(exporter) = self.exporter.as_mut() {
                    exporter
                        .export(frame, self.engine.grid(), &self.canvas)
                        .with_context(|| format!("Failed to export frame {}", frame))?;
                    exported_frames += 1;
                }
            }

            let report = self.engine.step();
            on_frame(&report);

            if self.realtime && !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }

        let summary = AnimationSummary {
            frames: total_frames,
            exported_frames,
            logo_loaded: self.engine.is_logo_loaded(),
            final_mismatch: self.engine.mismatch_count(),
            converged: self.engine.has_converged(),
            living_cells: self.engine.grid().living_count(),
            update_mode: self.engine.mode(),
            elapsed: start_time.elapsed(),
        };

        info!(
            exported_frames,
            converged = summary.converged,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "animation finished"
        );

        Ok(summary)
    }
}
