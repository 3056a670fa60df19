//! Loading logo images from disk and writing example logos

use super::palette::Palette;
use super::sampler::sample_rgba_image;
use crate::automaton::{Cell, Grid};
use anyhow::{Context, Result};
use image::{imageops, Rgba, RgbaImage};
use std::path::Path;

/// Decode an image file into RGBA pixels
pub fn load_logo_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("Failed to decode logo image: {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Draw `image` at the top-left of a transparent canvas.
///
/// Anything outside the canvas is clipped; uncovered canvas stays `(0, 0, 0, 0)`.
pub fn place_on_canvas(image: &RgbaImage, canvas_width: u32, canvas_height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(canvas_width, canvas_height);
    imageops::replace(&mut canvas, image, 0, 0);
    canvas
}

/// Load a logo, place it on the canvas and sample it into a grid
pub fn load_logo_grid<P: AsRef<Path>>(
    path: P,
    canvas_width: u32,
    canvas_height: u32,
    grid_width: usize,
    grid_height: usize,
    palette: &Palette,
) -> Result<Grid> {
    let path = path.as_ref();
    let image = load_logo_image(path)?;
    let canvas = place_on_canvas(&image, canvas_width, canvas_height);
    let grid = sample_rgba_image(&canvas, grid_width, grid_height, palette)
        .with_context(|| format!("Failed to sample logo: {}", path.display()))?;
    Ok(grid)
}

/// Paint the example logo: a foreground ring around a far-foreground square on background
pub fn example_logo(width: u32, height: u32, palette: &Palette) -> RgbaImage {
    let [br, bg, bb, ba] = palette.rgba(Cell::Background);
    let [fr, fg, fb, fa] = palette.rgba(Cell::Foreground);
    let [pr, pg, pb, pa] = palette.rgba(Cell::FarForeground);

    RgbaImage::from_fn(width, height, |px, py| {
        let u = (px as f64 + 0.5) / width as f64 * 2.0 - 1.0;
        let v = (py as f64 + 0.5) / height as f64 * 2.0 - 1.0;
        let r = (u * u + v * v).sqrt();

        if u.abs() < 0.25 && v.abs() < 0.25 {
            Rgba([pr, pg, pb, pa])
        } else if (0.55..0.8).contains(&r) {
            Rgba([fr, fg, fb, fa])
        } else {
            Rgba([br, bg, bb, ba])
        }
    })
}

/// Write the example logo as a PNG
pub fn create_example_logo<P: AsRef<Path>>(path: P, width: u32, height: u32, palette: &Palette) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    example_logo(width, height, palette)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write example logo: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_example_logo_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("assets/logo.png");
        let palette = Palette::default();

        create_example_logo(&path, 512, 512, &palette).unwrap();
        assert!(path.exists());

        let grid = load_logo_grid(&path, 512, 512, 30, 30, &palette).unwrap();
        assert_eq!(grid.width(), 30);
        assert_eq!(grid.get(15, 15), Cell::FarForeground);
        assert_eq!(grid.get(0, 0), Cell::Background);
        assert!(grid.count(Cell::Foreground) > 0);
    }

    #[test]
    fn test_small_image_leaves_transparent_canvas() {
        let palette = Palette::default();
        let logo = RgbaImage::from_pixel(10, 10, Rgba([178, 34, 34, 255]));
        let canvas = place_on_canvas(&logo, 40, 40);

        assert_eq!(canvas.dimensions(), (40, 40));
        assert_eq!(canvas.get_pixel(5, 5), &Rgba([178, 34, 34, 255]));
        assert_eq!(canvas.get_pixel(20, 20), &Rgba([0, 0, 0, 0]));

        // Transparent black is not a palette colour, so it samples as foreground
        let grid = sample_rgba_image(&canvas, 4, 4, &palette).unwrap();
        assert_eq!(grid.get(0, 0), Cell::Background);
        assert_eq!(grid.get(3, 3), Cell::Foreground);
        assert_eq!(grid.count(Cell::Background), 1);
    }

    #[test]
    fn test_missing_logo_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let result = load_logo_grid(temp_dir.path().join("nope.png"), 64, 64, 8, 8, &Palette::default());
        assert!(result.is_err());
    }
}
