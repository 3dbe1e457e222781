//! Gaussian kernel density estimation.
//!
//! Bandwidth follows Scott's rule, `h = sd * n^(-1/5)` with the sample
//! standard deviation. The evaluation grid spans the data extended by
//! `cut` bandwidths on each side. Non-finite values are missing and ignored.

use crate::chart::DensityPoint;
use serde::{Deserialize, Serialize};

/// Grid parameters for density evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdeParams {
    /// Number of evaluation points.
    pub grid_size: usize,
    /// Bandwidths to extend the grid past the data on each side.
    pub cut: f64,
}

impl Default for KdeParams {
    fn default() -> Self {
        Self {
            grid_size: 200,
            cut: 3.0,
        }
    }
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Scott's rule bandwidth, or `None` when fewer than two finite values or
/// no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let values = finite(values);
    let n = values.len();
    if n < 2 {
        return None;
    }
    // Constant samples leave a rounding-sized sd behind
    let (min, max) = extent(&values);
    if max - min <= f64::EPSILON * max.abs().max(min.abs()).max(1.0) {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = variance.sqrt();
    if !sd.is_finite() || sd <= 0.0 {
        return None;
    }
    Some(sd * (n as f64).powf(-0.2))
}

/// Estimate the density of `values` on an evenly spaced grid.
///
/// The estimate integrates to one over the real line. Returns `None` when
/// the bandwidth cannot be estimated.
pub fn gaussian_kde(values: &[f64], params: &KdeParams) -> Option<Vec<DensityPoint>> {
    let bw = scott_bandwidth(values)?;
    let values = finite(values);
    let grid_size = params.grid_size.max(2);

    let (min, max) = extent(&values);
    let lo = min - params.cut * bw;
    let hi = max + params.cut * bw;
    let step = (hi - lo) / (grid_size - 1) as f64;

    let norm = 1.0 / (values.len() as f64 * bw * (2.0 * std::f64::consts::PI).sqrt());
    let points = (0..grid_size)
        .map(|i| {
            let x = lo + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum();
            DensityPoint {
                value: x,
                density: sum * norm,
            }
        })
        .collect();
    Some(points)
}
