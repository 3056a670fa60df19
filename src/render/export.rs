//! Writing rendered frames to disk

use crate::automaton::{grid_to_string, Grid};
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Receives one frame per animation step
pub trait FrameExporter {
    /// Persist frame `index`, returning the path written
    fn export(&mut self, index: u64, grid: &Grid, image: &RgbaImage) -> Result<PathBuf>;
}

/// `frame_{index}.{extension}` inside `directory`
pub fn frame_path(directory: &Path, index: u64, extension: &str) -> PathBuf {
    directory.join(format!("frame_{}.{}", index, extension))
}

fn ensure_directory(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory: {}", directory.display()))
}

/// Rendered canvas as PNG
pub struct PngExporter {
    directory: PathBuf,
}

impl PngExporter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        ensure_directory(directory.as_ref())?;
        Ok(Self {
            directory: directory.as_ref().to_path_buf(),
        })
    }
}

impl FrameExporter for PngExporter {
    fn export(&mut self, index: u64, _grid: &Grid, image: &RgbaImage) -> Result<PathBuf> {
        let path = frame_path(&self.directory, index, "png");
        image
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write frame: {}", path.display()))?;
        Ok(path)
    }
}

/// Grid digits, one row per line
pub struct TextExporter {
    directory: PathBuf,
}

impl TextExporter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        ensure_directory(directory.as_ref())?;
        Ok(Self {
            directory: directory.as_ref().to_path_buf(),
        })
    }
}

impl FrameExporter for TextExporter {
    fn export(&mut self, index: u64, grid: &Grid, _image: &RgbaImage) -> Result<PathBuf> {
        let path = frame_path(&self.directory, index, "txt");
        std::fs::write(&path, grid_to_string(grid))
            .with_context(|| format!("Failed to write frame: {}", path.display()))?;
        Ok(path)
    }
}

#[derive(Serialize)]
struct FrameDocument<'a> {
    frame: u64,
    grid: &'a Grid,
}

/// Frame index and grid as JSON
pub struct JsonExporter {
    directory: PathBuf,
}

impl JsonExporter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        ensure_directory(directory.as_ref())?;
        Ok(Self {
            directory: directory.as_ref().to_path_buf(),
        })
    }
}

impl FrameExporter for JsonExporter {
    fn export(&mut self, index: u64, grid: &Grid, _image: &RgbaImage) -> Result<PathBuf> {
        let path = frame_path(&self.directory, index, "json");
        let json = serde_json::to_string_pretty(&FrameDocument { frame: index, grid })
            .context("Failed to serialize frame")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write frame: {}", path.display()))?;
        Ok(path)
    }
}

/// Build the exporter for an output format
pub fn exporter_for<P: AsRef<Path>>(format: OutputFormat, directory: P) -> Result<Box<dyn FrameExporter>> {
    let exporter: Box<dyn FrameExporter> = match format {
        OutputFormat::Png => Box::new(PngExporter::new(directory)?),
        OutputFormat::Text => Box::new(TextExporter::new(directory)?),
        OutputFormat::Json => Box::new(JsonExporter::new(directory)?),
    };
    Ok(exporter)
}
