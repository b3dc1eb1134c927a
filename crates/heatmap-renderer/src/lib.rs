//! Signal-strength heatmap rendering.
//!
//! Turns a sparse, irregularly placed set of `(x, y, rssi)` samples into a
//! smooth, semi-transparent color-mapped PNG suitable for overlay on a floor
//! plan. The pipeline:
//!
//! 1. Normalize RSSI into [0, 1] against the fixed [-90, -30] dBm range
//! 2. Fit a multiquadric RBF interpolant over the sample coordinates
//! 3. Evaluate the interpolant on a uniform grid over the logical canvas
//! 4. Map the clamped field through a reversed jet ramp with 0.9 alpha
//! 5. Resample to the requested pixel size (Lanczos3) and encode as PNG
//!
//! Rendering is pure and stateless: every call refits the interpolant from
//! scratch and owns its own buffers, so concurrent calls are independent.

pub mod colormap;
pub mod png;
pub mod raster;
pub mod rbf;

use thiserror::Error;
use tracing::debug;

use wifi_common::SamplePoint;

use raster::{evaluate_field, field_to_pixels, resize_to, MAX_GRID_DIM};
use rbf::RbfInterpolant;

/// Errors surfaced by [`render`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid output dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No sample points to interpolate")]
    NoSamples,

    #[error("Interpolation system is singular (degenerate sample layout)")]
    SingularSystem,

    #[error("PNG encoding failed: {0}")]
    Encoding(String),
}

/// Render a set of signal samples as a `width x height` heatmap PNG.
///
/// An empty sample set is a defined terminal case, not an error: the result
/// is a fully transparent PNG of the requested size. Any failure during
/// interpolation or encoding returns an error; a corrupt or partial image is
/// never produced.
///
/// The field is evaluated at one point per output pixel up to
/// [`raster::MAX_GRID_DIM`] per axis; larger outputs are evaluated at that
/// resolution and Lanczos-resampled to the requested size, so above the cap
/// the field is smoother than a strictly per-pixel evaluation would be.
pub fn render(points: &[SamplePoint], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    if points.is_empty() {
        debug!(width, height, "no samples, rendering transparent image");
        return transparent_png(width, height);
    }

    let interpolant = RbfInterpolant::fit(points)?;

    // Evaluate on an internal grid capped per axis; the dense evaluation cost
    // scales with grid area times sample count, so very large outputs are
    // evaluated coarser and resampled up.
    let grid_w = width.min(MAX_GRID_DIM);
    let grid_h = height.min(MAX_GRID_DIM);

    let field = evaluate_field(&interpolant, grid_w, grid_h);
    let pixels = field_to_pixels(&field);

    let image = resize_to(pixels, grid_w, grid_h, width, height);

    debug!(
        samples = points.len(),
        grid_w, grid_h, width, height, "heatmap rendered"
    );

    png::encode_rgba(image.as_raw(), width as usize, height as usize)
        .map_err(RenderError::Encoding)
}

/// Produce a fully transparent PNG of the given size.
pub fn transparent_png(width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let pixels = vec![0u8; width as usize * height as usize * 4];
    png::encode_rgba(&pixels, width as usize, height as usize).map_err(RenderError::Encoding)
}
