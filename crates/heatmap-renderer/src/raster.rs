//! Field evaluation and rasterization over the logical canvas.
//!
//! Coordinate convention, pinned by tests because it is easy to get
//! backwards: row 0 of the evaluated field is logical y = 0 and lands at the
//! *top* of the output image. Logical y grows downward in image space.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use wifi_common::CANVAS_SIZE;

use crate::colormap::signal_color;
use crate::rbf::RbfInterpolant;

/// Cap on the internal evaluation grid, per axis. Larger outputs are
/// evaluated at this resolution and resampled up with Lanczos3.
pub const MAX_GRID_DIM: u32 = 256;

/// Evaluate the interpolant on a uniform `grid_w x grid_h` grid spanning the
/// logical canvas, clamping the field to [0, 1].
///
/// Returns row-major values; row 0 corresponds to logical y = 0.
pub fn evaluate_field(interpolant: &RbfInterpolant, grid_w: u32, grid_h: u32) -> Vec<f64> {
    let mut field = Vec::with_capacity(grid_w as usize * grid_h as usize);

    for row in 0..grid_h {
        let y = grid_coord(row, grid_h);
        for col in 0..grid_w {
            let x = grid_coord(col, grid_w);
            field.push(interpolant.eval(x, y).clamp(0.0, 1.0));
        }
    }

    field
}

/// Logical coordinate of grid index `i` out of `n` linearly spaced points
/// covering [0, CANVAS_SIZE] inclusive.
fn grid_coord(i: u32, n: u32) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 * CANVAS_SIZE / (n - 1) as f64
    }
}

/// Map a clamped field to RGBA pixel bytes via the signal colormap.
pub fn field_to_pixels(field: &[f64]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(field.len() * 4);
    for &value in field {
        let c = signal_color(value);
        pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }
    pixels
}

/// Wrap raw pixels in an image buffer, resampling to the requested output
/// size when the internal grid resolution differs.
pub fn resize_to(pixels: Vec<u8>, grid_w: u32, grid_h: u32, width: u32, height: u32) -> RgbaImage {
    let image = RgbaImage::from_raw(grid_w, grid_h, pixels)
        .expect("pixel buffer length matches grid dimensions");

    if grid_w == width && grid_h == height {
        image
    } else {
        imageops::resize(&image, width, height, FilterType::Lanczos3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifi_common::SamplePoint;

    #[test]
    fn test_grid_coord_endpoints() {
        assert_eq!(grid_coord(0, 10), 0.0);
        assert_eq!(grid_coord(9, 10), CANVAS_SIZE);
        assert_eq!(grid_coord(0, 1), 0.0);
    }

    #[test]
    fn test_field_row_zero_is_logical_y_zero() {
        // Strong signal at the top of the canvas, weak at the bottom. The
        // first rows of the field must carry the higher values.
        let points = [
            SamplePoint::new(50.0, 0.0, -30),
            SamplePoint::new(50.0, 100.0, -90),
        ];
        let interp = RbfInterpolant::fit(&points).unwrap();
        let field = evaluate_field(&interp, 11, 11);

        let top_mid = field[5]; // row 0, col 5
        let bottom_mid = field[10 * 11 + 5]; // last row, col 5
        assert!(
            top_mid > bottom_mid,
            "row 0 must correspond to logical y = 0 (top): top={} bottom={}",
            top_mid,
            bottom_mid
        );
    }

    #[test]
    fn test_field_is_clamped() {
        let points = [
            SamplePoint::new(10.0, 10.0, -30),
            SamplePoint::new(90.0, 90.0, -90),
            SamplePoint::new(50.0, 50.0, -35),
        ];
        let interp = RbfInterpolant::fit(&points).unwrap();
        for v in evaluate_field(&interp, 32, 32) {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_resize_changes_dimensions_only_when_needed() {
        let pixels = vec![0u8; 16 * 16 * 4];
        let same = resize_to(pixels.clone(), 16, 16, 16, 16);
        assert_eq!((same.width(), same.height()), (16, 16));

        let scaled = resize_to(pixels, 16, 16, 40, 24);
        assert_eq!((scaled.width(), scaled.height()), (40, 24));
    }
}
