use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_VMAX_PERCENTILE, DEFAULT_VMIN_PERCENTILE};
use crate::error::{FitsViewError, Result};

/// How raw values are mapped into the display range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    #[default]
    Linear,
    Log,
}

impl ScaleMode {
    pub const ALL: &'static [ScaleMode] = &[ScaleMode::Linear, ScaleMode::Log];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Log => "Log",
        }
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(format!("unknown scale mode '{other}' (expected linear or log)")),
        }
    }
}

/// User-chosen normalization parameters. Bounds are derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationState {
    pub mode: ScaleMode,
    /// Lower percentile in [0, 100].
    pub vmin_percentile: f64,
    /// Upper percentile in [0, 100].
    pub vmax_percentile: f64,
}

impl Default for NormalizationState {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Linear,
            vmin_percentile: DEFAULT_VMIN_PERCENTILE,
            vmax_percentile: DEFAULT_VMAX_PERCENTILE,
        }
    }
}

impl NormalizationState {
    /// Reject percentiles outside [0, 100] or in the wrong order.
    pub fn validate(&self) -> Result<()> {
        for p in [self.vmin_percentile, self.vmax_percentile] {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                return Err(FitsViewError::PercentileOutOfRange(p));
            }
        }
        if self.vmin_percentile > self.vmax_percentile {
            return Err(FitsViewError::PercentileOrder {
                vmin: self.vmin_percentile,
                vmax: self.vmax_percentile,
            });
        }
        Ok(())
    }
}

/// Display bounds computed from the image and a [`NormalizationState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormBounds {
    pub low: f64,
    pub high: f64,
    pub mode: ScaleMode,
}

impl NormBounds {
    /// Map a raw value into [0, 1]. `None` for values that cannot be shown.
    pub fn apply(&self, v: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        let (v, lo, hi) = match self.mode {
            ScaleMode::Linear => (v, self.low, self.high),
            ScaleMode::Log => {
                if v <= 0.0 || self.low <= 0.0 {
                    return None;
                }
                (v.ln(), self.low.ln(), self.high.ln())
            }
        };
        let range = hi - lo;
        if range <= 0.0 {
            return Some(0.0);
        }
        Some(((v - lo) / range).clamp(0.0, 1.0))
    }
}

/// Parse one percentile entry from a text field.
pub fn parse_percentile(text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| FitsViewError::InvalidPercentile(text.to_string()))?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(FitsViewError::PercentileOutOfRange(value));
    }
    Ok(value)
}

/// Finite pixel values in ascending order.
pub fn sorted_finite(data: &Array2<f64>) -> Vec<f64> {
    let mut values: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Percentile of pre-sorted values with linear interpolation between ranks.
///
/// `p` is in [0, 100]; `sorted` must be non-empty.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Percentile of the finite pixels of `data`.
pub fn percentile(data: &Array2<f64>, p: f64) -> Result<f64> {
    if !p.is_finite() || !(0.0..=100.0).contains(&p) {
        return Err(FitsViewError::PercentileOutOfRange(p));
    }
    let sorted = sorted_finite(data);
    if sorted.is_empty() {
        return Err(FitsViewError::EmptyImage);
    }
    Ok(percentile_sorted(&sorted, p))
}

/// Compute display bounds for `data` under `state`.
///
/// Log mode fails if any pixel other than NaN is zero or negative,
/// `-inf` included.
pub fn compute_bounds(data: &Array2<f64>, state: &NormalizationState) -> Result<NormBounds> {
    state.validate()?;

    if state.mode == ScaleMode::Log {
        let min = data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::INFINITY, f64::min);
        if min <= 0.0 {
            return Err(FitsViewError::LogScaleDomain(min));
        }
    }

    let sorted = sorted_finite(data);
    if sorted.is_empty() {
        return Err(FitsViewError::EmptyImage);
    }

    let low = percentile_sorted(&sorted, state.vmin_percentile);
    let high = percentile_sorted(&sorted, state.vmax_percentile);
    debug!(
        "Normalization {:?} p{}..p{} -> [{low}, {high}]",
        state.mode, state.vmin_percentile, state.vmax_percentile
    );

    Ok(NormBounds {
        low,
        high,
        mode: state.mode,
    })
}
