//! Scattered-data interpolation with multiquadric radial basis functions.
//!
//! The interpolated field is a weighted sum of multiquadric basis functions
//! `phi(r) = sqrt(1 + (eps * r)^2)` centered at each sample, with weights
//! solved from the dense linear system `phi(||c_i - c_j||) * w = v` so the
//! field reproduces every sample value exactly at its own coordinate.
//!
//! The direct solve is O(n^3) in the sample count. That is fine for the
//! hand-collected point sets this serves (tens of points); a compactly
//! supported kernel would be the upgrade path if that ever changes.

use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

use wifi_common::SamplePoint;

use crate::RenderError;

/// Multiquadric shape parameter. Fixed; matches the field's established
/// visual tuning for the 0–100 logical canvas.
const EPSILON: f64 = 1.0;

/// A fitted multiquadric RBF interpolant over 2-D sample coordinates.
pub struct RbfInterpolant {
    centers: Vec<(f64, f64)>,
    weights: DVector<f64>,
}

impl RbfInterpolant {
    /// Fit an interpolant through the given samples.
    ///
    /// Samples sharing identical coordinates are averaged first; exact
    /// duplicates would otherwise make the system singular. An empty sample
    /// set, or a layout that still yields a singular system, is reported as
    /// an error rather than a panic or a garbage fit.
    pub fn fit(points: &[SamplePoint]) -> Result<Self, RenderError> {
        if points.is_empty() {
            return Err(RenderError::NoSamples);
        }

        let (centers, values) = merge_duplicates(points);
        let n = centers.len();

        let a = DMatrix::from_fn(n, n, |i, j| {
            let (xi, yi) = centers[i];
            let (xj, yj) = centers[j];
            multiquadric(((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt())
        });
        let b = DVector::from_vec(values);

        let weights = a.lu().solve(&b).ok_or(RenderError::SingularSystem)?;

        Ok(Self { centers, weights })
    }

    /// Evaluate the interpolated field at a point.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.centers
            .iter()
            .zip(self.weights.iter())
            .map(|(&(cx, cy), &w)| {
                let r = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                w * multiquadric(r)
            })
            .sum()
    }
}

#[inline]
fn multiquadric(r: f64) -> f64 {
    (1.0 + (EPSILON * r).powi(2)).sqrt()
}

/// Collapse samples with identical coordinates into one center holding the
/// mean of their normalized values.
fn merge_duplicates(points: &[SamplePoint]) -> (Vec<(f64, f64)>, Vec<f64>) {
    let mut order: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    let mut sums: HashMap<(u64, u64), (f64, u32)> = HashMap::with_capacity(points.len());

    for p in points {
        let key = (p.x.to_bits(), p.y.to_bits());
        let entry = sums.entry(key).or_insert_with(|| {
            order.push((p.x, p.y));
            (0.0, 0)
        });
        entry.0 += p.normalized_signal();
        entry.1 += 1;
    }

    let values = order
        .iter()
        .map(|&(x, y)| {
            let (sum, count) = sums[&(x.to_bits(), y.to_bits())];
            sum / count as f64
        })
        .collect();

    (order, values)
}
