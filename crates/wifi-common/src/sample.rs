//! Heatmap sample points and signal normalization.

use serde::{Deserialize, Serialize};

/// Side length of the logical measurement canvas.
///
/// Sample coordinates live in a fixed 0–100 square on each axis, independent
/// of the pixel resolution an image is eventually rendered at.
pub const CANVAS_SIZE: f64 = 100.0;

/// Weakest RSSI of the normalization reference range, in dBm.
pub const MIN_RSSI: i32 = -90;

/// Strongest RSSI of the normalization reference range, in dBm.
pub const MAX_RSSI: i32 = -30;

/// A single user-collected signal-strength measurement.
///
/// `x` and `y` are logical canvas coordinates; `rssi` is the received signal
/// strength in dBm, typically in [-100, -30] but not strictly validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub rssi: i32,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, rssi: i32) -> Self {
        Self { x, y, rssi }
    }

    /// Map the raw RSSI linearly from [MIN_RSSI, MAX_RSSI] into [0, 1].
    ///
    /// Values outside the reference range clamp, so a higher normalized value
    /// always means a stronger signal.
    pub fn normalized_signal(&self) -> f64 {
        normalize_rssi(self.rssi)
    }
}

/// Normalize an RSSI value into [0, 1] against the fixed reference range.
pub fn normalize_rssi(rssi: i32) -> f64 {
    let span = (MAX_RSSI - MIN_RSSI) as f64;
    ((rssi - MIN_RSSI) as f64 / span).clamp(0.0, 1.0)
}
