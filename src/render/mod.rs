//! Renderer and frame exporters

pub mod export;
pub mod frame;

pub use export::{exporter_for, frame_path, FrameExporter, JsonExporter, PngExporter, TextExporter};
pub use frame::{render_frame, render_into};
