use std::f64::consts::PI;
use std::fmt;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{FitsViewError, Result};
use crate::normalize::NormBounds;
use crate::roi::DisplayOrigin;

/// Colour for pixels with no displayable value (NaN, or non-positive in log mode).
pub const BAD_COLOR: [u8; 3] = [0, 0, 0];

/// Display colour maps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colormap {
    Gray,
    #[default]
    Rainbow,
}

impl Colormap {
    pub const ALL: &'static [Colormap] = &[Colormap::Gray, Colormap::Rainbow];

    /// Colour for a normalized value `t` in [0, 1].
    pub fn map(&self, t: f64) -> [u8; 3] {
        let t = t.clamp(0.0, 1.0);
        let (r, g, b) = match self {
            Self::Gray => (t, t, t),
            Self::Rainbow => (
                (2.0 * t - 1.0).abs(),
                (PI * t).sin(),
                (PI * t / 2.0).cos(),
            ),
        };
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray => write!(f, "Gray"),
            Self::Rainbow => write!(f, "Rainbow"),
        }
    }
}

impl std::str::FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "rainbow" => Ok(Self::Rainbow),
            other => Err(format!("unknown colormap '{other}' (expected gray or rainbow)")),
        }
    }
}

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render `data` through `bounds` and `colormap` into an 8-bit RGB image
/// in display orientation.
pub fn render_rgb(
    data: &Array2<f64>,
    bounds: &NormBounds,
    colormap: Colormap,
    origin: DisplayOrigin,
) -> RgbImage {
    let (h, w) = data.dim();
    let mut buf = vec![0u8; h * w * 3];
    if h == 0 || w == 0 {
        return RgbImage::new(w as u32, h as u32);
    }

    let fill_row = |(display_row, out): (usize, &mut [u8])| {
        let src = data.row(origin.source_row(display_row, h));
        for (px, &v) in out.chunks_exact_mut(3).zip(src.iter()) {
            let rgb = bounds.apply(v).map_or(BAD_COLOR, |t| colormap.map(t));
            px.copy_from_slice(&rgb);
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(w * 3).enumerate().for_each(fill_row);
    } else {
        buf.chunks_mut(w * 3).enumerate().for_each(fill_row);
    }

    RgbImage::from_raw(w as u32, h as u32, buf).unwrap_or_else(|| RgbImage::new(w as u32, h as u32))
}

/// Save a rendered view as 8-bit RGB PNG.
pub fn save_png(rgb: &RgbImage, path: &Path) -> Result<()> {
    rgb.save_with_format(path, ImageFormat::Png)?;
    info!("Saved view {}x{} to {}", rgb.width(), rgb.height(), path.display());
    Ok(())
}

/// Equal-width histogram of the finite pixel values.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        (self.max - self.min) / self.counts.len() as f64
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        self.min + (i as f64 + 0.5) * self.bin_width()
    }
}

/// Bin the finite values of `data` into `bins` buckets spanning min..=max.
pub fn histogram(data: &Array2<f64>, bins: usize) -> Result<Histogram> {
    let bins = bins.max(1);
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return Err(FitsViewError::EmptyImage);
    }

    let mut counts = vec![0u64; bins];
    let range = max - min;
    for &v in data.iter().filter(|v| v.is_finite()) {
        let idx = if range > 0.0 {
            (((v - min) / range) * bins as f64) as usize
        } else {
            0
        };
        counts[idx.min(bins - 1)] += 1;
    }

    Ok(Histogram { min, max, counts })
}
