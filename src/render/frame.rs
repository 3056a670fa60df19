//! Rasterising the grid onto an RGBA canvas

use crate::automaton::{Cell, Grid};
use crate::logo::Palette;
use image::RgbaImage;
use rayon::prelude::*;

/// Render `grid` onto a new `canvas_width x canvas_height` image
pub fn render_frame(grid: &Grid, canvas_width: u32, canvas_height: u32, palette: &Palette) -> RgbaImage {
    let mut canvas = RgbaImage::new(canvas_width, canvas_height);
    render_into(grid, palette, &mut canvas);
    canvas
}

/// Fill every pixel of `canvas` with the colour of the cell it falls in.
///
/// Pixel `(px, py)` belongs to cell `(px * grid.width() / canvas_width, py * grid.height() / canvas_height)`,
/// which is the integer form of filling each cell's `cell_width x cell_height` rectangle.
pub fn render_into(grid: &Grid, palette: &Palette, canvas: &mut RgbaImage) {
    let (canvas_width, canvas_height) = canvas.dimensions();
    let (canvas_width, canvas_height) = (canvas_width as usize, canvas_height as usize);
    if canvas_width == 0 || canvas_height == 0 {
        return;
    }

    let colors = [
        palette.rgba(Cell::Background),
        palette.rgba(Cell::Foreground),
        palette.rgba(Cell::FarForeground),
    ];
    let columns: Vec<usize> = (0..canvas_width)
        .map(|px| px * grid.width() / canvas_width)
        .collect();

    let pixels: &mut [u8] = canvas;
    pixels
        .par_chunks_mut(canvas_width * 4)
        .enumerate()
        .for_each(|(py, row)| {
            let y = py * grid.height() / canvas_height;
            for (pixel, &x) in row.chunks_exact_mut(4).zip(&columns) {
                pixel.copy_from_slice(&colors[grid.get(x, y).value() as usize]);
            }
        });
}
