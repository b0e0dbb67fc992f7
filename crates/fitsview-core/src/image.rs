use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FitsViewError, Result};
use crate::header::Header;

/// FITS `BITPIX` data types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitPix {
    UInt8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl BitPix {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            8 => Ok(Self::UInt8),
            16 => Ok(Self::Int16),
            32 => Ok(Self::Int32),
            64 => Ok(Self::Int64),
            -32 => Ok(Self::Float32),
            -64 => Ok(Self::Float64),
            other => Err(FitsViewError::UnsupportedBitpix(other)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::UInt8 => 8,
            Self::Int16 => 16,
            Self::Int32 => 32,
            Self::Int64 => 64,
            Self::Float32 => -32,
            Self::Float64 => -64,
        }
    }

    /// Bytes per stored sample.
    pub fn bytes_per_sample(&self) -> usize {
        (self.code().unsigned_abs() / 8) as usize
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

/// A loaded 2-D FITS image with its header.
///
/// `data` is row-major with shape `(NAXIS2, NAXIS1)`: rows run along the
/// declination axis, columns along right ascension. Values are physical
/// (`BZERO`/`BSCALE` already applied).
#[derive(Clone, Debug)]
pub struct FitsImage {
    pub data: Array2<f64>,
    pub header: Header,
    pub bitpix: BitPix,
}

impl FitsImage {
    pub fn new(data: Array2<f64>, header: Header, bitpix: BitPix) -> Self {
        Self {
            data,
            header,
            bitpix,
        }
    }

    /// Wrap a bare array in a minimal primary header (`BITPIX = -64`).
    pub fn from_array(data: Array2<f64>) -> Self {
        let mut header = Header::new();
        header.set("SIMPLE", true);
        header.set("BITPIX", BitPix::Float64.code());
        header.set("NAXIS", 2i64);
        header.set("NAXIS1", data.ncols());
        header.set("NAXIS2", data.nrows());
        Self::new(data, header, BitPix::Float64)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Pixel value at column `x`, row `y`.
    pub fn value_at(&self, x: usize, y: usize) -> Option<f64> {
        self.data.get([y, x]).copied()
    }
}

/// Summary of a file shown after opening.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bitpix: BitPix,
    /// Axis lengths as declared in the header, before squeezing.
    pub header_axes: Vec<usize>,
    pub object: Option<String>,
    pub telescope: Option<String>,
}

impl SourceInfo {
    pub fn from_image(path: &Path, image: &FitsImage) -> Self {
        Self::from_header(path, &image.header, image.width(), image.height(), image.bitpix)
    }

    pub fn from_header(
        path: &Path,
        header: &Header,
        width: usize,
        height: usize,
        bitpix: BitPix,
    ) -> Self {
        Self {
            filename: path.to_path_buf(),
            width,
            height,
            bitpix,
            header_axes: header.axes().unwrap_or_default(),
            object: header.get_str("OBJECT").map(str::to_string),
            telescope: header.get_str("TELESCOP").map(str::to_string),
        }
    }
}
