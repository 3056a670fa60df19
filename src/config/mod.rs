//! Configuration management for the logo animation

pub mod settings;

pub use settings::{
    AnimationConfig, CliOverrides, GridConfig, InputConfig, OutputConfig, OutputFormat, RenderConfig,
    Settings,
};
