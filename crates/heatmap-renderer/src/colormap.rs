//! Color mapping for the heatmap field.
//!
//! The ramp is the classic "jet" diverging colormap applied reversed: a
//! normalized field value of 1.0 (strong signal) maps to the cool blue end
//! and 0.0 (weak signal) to the warm red end. Warm areas therefore mark the
//! dead zones the user cares about. This direction is a fixed convention and
//! must not flip between calls.

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }
}

/// Fixed overlay opacity so the heatmap stays readable over a floor plan.
pub const HEATMAP_ALPHA: u8 = 229; // 0.9 * 255

/// Map a normalized signal value in [0, 1] to its heatmap color.
///
/// Strong (1.0) is cool blue, weak (0.0) is warm red.
pub fn signal_color(value: f64) -> Color {
    let t = value.clamp(0.0, 1.0);
    jet(1.0 - t)
}

/// The jet colormap: dark blue through cyan, green, yellow, to dark red.
///
/// Piecewise-linear channel ramps over t in [0, 1].
pub fn jet(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);

    let r = channel(4.0 * t - 1.5, -4.0 * t + 4.5);
    let g = channel(4.0 * t - 0.5, -4.0 * t + 3.5);
    let b = channel(4.0 * t + 0.5, -4.0 * t + 2.5);

    Color::new(r, g, b, HEATMAP_ALPHA)
}

#[inline]
fn channel(up: f64, down: f64) -> u8 {
    (up.min(down).clamp(0.0, 1.0) * 255.0).round() as u8
}
