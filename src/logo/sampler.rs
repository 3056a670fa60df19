//! Image-to-grid sampling

use super::palette::Palette;
use crate::automaton::{AutomatonError, Grid};
use image::RgbaImage;

/// Sample an RGBA pixel buffer into a `grid_width x grid_height` grid.
///
/// Each cell reads the single pixel under its centre,
/// `(floor((i + 0.5) * cell_width), floor((j + 0.5) * cell_height))`, and is
/// classified by exact RGB match against the palette. Alpha is ignored.
pub fn sample_image_to_grid(
    pixels: &[u8],
    width: usize,
    height: usize,
    grid_width: usize,
    grid_height: usize,
    palette: &Palette,
) -> Result<Grid, AutomatonError> {
    let expected = width * height * 4;
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(AutomatonError::PixelBufferSize {
            len: pixels.len(),
            expected,
            width,
            height,
        });
    }

    let mut grid = Grid::new(grid_width, grid_height)?;
    let cell_width = width as f64 / grid_width as f64;
    let cell_height = height as f64 / grid_height as f64;

    for j in 0..grid_height {
        let cy = (((j as f64 + 0.5) * cell_height).floor() as usize).min(height - 1);
        for i in 0..grid_width {
            let cx = (((i as f64 + 0.5) * cell_width).floor() as usize).min(width - 1);
            let offset = (cy * width + cx) * 4;
            let rgb = [pixels[offset], pixels[offset + 1], pixels[offset + 2]];
            grid.replace(i, j, palette.classify(rgb));
        }
    }

    Ok(grid)
}

/// Sample a decoded image
pub fn sample_rgba_image(
    image: &RgbaImage,
    grid_width: usize,
    grid_height: usize,
    palette: &Palette,
) -> Result<Grid, AutomatonError> {
    sample_image_to_grid(
        image.as_raw(),
        image.width() as usize,
        image.height() as usize,
        grid_width,
        grid_height,
        palette,
    )
}
