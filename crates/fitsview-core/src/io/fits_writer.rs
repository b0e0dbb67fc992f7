use std::fs;
use std::path::{Path, PathBuf};

use fitsio::images::{ImageDescription, ImageType};
use fitsio::FitsFile;
use tracing::info;

use crate::error::{FitsViewError, Result};
use crate::header::Header;
use crate::image::{BitPix, FitsImage};
use crate::io::records;

impl BitPix {
    /// Stored sample type cfitsio creates for this BITPIX.
    pub fn image_type(&self) -> ImageType {
        match self {
            Self::UInt8 => ImageType::UnsignedByte,
            Self::Int16 => ImageType::Short,
            Self::Int32 => ImageType::Long,
            Self::Int64 => ImageType::LongLong,
            Self::Float32 => ImageType::Float,
            Self::Float64 => ImageType::Double,
        }
    }

    /// Inclusive range of stored integer samples.
    fn stored_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::UInt8 => Some((0.0, u8::MAX as f64)),
            Self::Int16 => Some((i16::MIN as f64, i16::MAX as f64)),
            Self::Int32 => Some((i32::MIN as f64, i32::MAX as f64)),
            Self::Int64 => Some((i64::MIN as f64, i64::MAX as f64)),
            Self::Float32 | Self::Float64 => None,
        }
    }
}

/// Inverse scaling parameters of an integer image.
#[derive(Clone, Copy, Debug)]
struct Scaling {
    bzero: f64,
    bscale: f64,
    blank: Option<i64>,
}

impl Scaling {
    /// Round and saturate a physical value so cfitsio stores it in range.
    /// NaN maps to BLANK, or to a stored 0 without one.
    fn saturate(&self, v: f64, (lo, hi): (f64, f64)) -> f64 {
        let stored = if v.is_nan() {
            self.blank.map(|b| b as f64).unwrap_or(0.0)
        } else {
            ((v - self.bzero) / self.bscale).round().clamp(lo, hi)
        };
        stored * self.bscale + self.bzero
    }
}

/// Write an image with its header, overwriting any existing file.
///
/// The header's BITPIX and axis lengths must describe `image.data`. The file
/// is written to a sibling temporary path and renamed into place, so nothing
/// appears at `path` unless the write completes.
pub fn write_fits(path: &Path, image: &FitsImage) -> Result<()> {
    let axes = validate_header(image)?;

    let header = &image.header;
    let scaling = Scaling {
        bzero: header.get_f64("BZERO").unwrap_or(0.0),
        bscale: header.get_f64("BSCALE").unwrap_or(1.0),
        blank: header.get_i64("BLANK"),
    };
    if scaling.bscale == 0.0 {
        return Err(FitsViewError::HeaderMismatch("BSCALE is zero".into()));
    }

    let values: Vec<f64> = match image.bitpix.stored_range() {
        Some(range) => image.data.iter().map(|&v| scaling.saturate(v, range)).collect(),
        None => image.data.iter().copied().collect(),
    };

    let temp_path = temp_path_for(path);
    let result = write_hdu(&temp_path, image.bitpix, &axes, header, &values)
        .and_then(|()| Ok(fs::rename(&temp_path, path)?));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    info!(
        "Wrote {} ({}x{}, BITPIX={})",
        path.display(),
        image.width(),
        image.height(),
        image.bitpix.code()
    );
    Ok(())
}

fn write_hdu(
    path: &Path,
    bitpix: BitPix,
    axes: &[usize],
    header: &Header,
    values: &[f64],
) -> Result<()> {
    // fitsio takes dimensions slowest axis first.
    let dimensions: Vec<usize> = axes.iter().rev().copied().collect();
    let description = ImageDescription {
        data_type: bitpix.image_type(),
        dimensions: &dimensions,
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .overwrite()
        .open()?;
    let hdu = fptr.primary_hdu()?;

    for card in header.cards() {
        if !records::is_structural(&card.keyword) {
            records::write_card(&mut fptr, card)?;
        }
    }
    records::reload_structure(&mut fptr)?;

    hdu.write_image(&mut fptr, values)?;
    Ok(())
}

/// Check that the header describes the data; returns the header axes.
fn validate_header(image: &FitsImage) -> Result<Vec<usize>> {
    let header = &image.header;

    match header.cards().first() {
        Some(card) if card.keyword == "SIMPLE" => {}
        _ => {
            return Err(FitsViewError::HeaderMismatch(
                "first card must be SIMPLE".into(),
            ))
        }
    }

    let bitpix = header
        .get_i64("BITPIX")
        .ok_or_else(|| FitsViewError::MissingKeyword("BITPIX".into()))?;
    if bitpix != image.bitpix.code() {
        return Err(FitsViewError::HeaderMismatch(format!(
            "BITPIX = {bitpix} but data is {:?}",
            image.bitpix
        )));
    }

    let axes = header
        .axes()
        .ok_or_else(|| FitsViewError::MissingKeyword("NAXISn".into()))?;
    if axes.len() < 2 || axes[0] != image.width() || axes[1] != image.height() {
        return Err(FitsViewError::HeaderMismatch(format!(
            "axes {axes:?} do not describe a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    let total = axes.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n));
    if total != Some(image.data.len()) {
        return Err(FitsViewError::HeaderMismatch(format!(
            "axes {axes:?} do not hold the {} pixels of the data",
            image.data.len()
        )));
    }
    Ok(axes)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output.fits".to_string());
    path.with_file_name(format!(".{name}.part"))
}
