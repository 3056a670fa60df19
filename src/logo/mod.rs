//! Logo image source: palette, sampling and image files

pub mod image_io;
pub mod palette;
pub mod sampler;

pub use image_io::{create_example_logo, load_logo_grid, load_logo_image, place_on_canvas};
pub use palette::{Palette, Rgb};
pub use sampler::{sample_image_to_grid, sample_rgba_image};
