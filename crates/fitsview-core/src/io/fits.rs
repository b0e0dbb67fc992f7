use std::path::Path;

use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::FitsFile;
use ndarray::Array2;
use tracing::{debug, info};

use crate::error::{FitsViewError, Result};
use crate::header::Header;
use crate::image::{BitPix, FitsImage, SourceInfo};
use crate::io::records;

/// Primary-HDU layout derived from the HDU shape and header.
#[derive(Clone, Debug)]
pub struct ImageLayout {
    pub bitpix: BitPix,
    pub width: usize,
    pub height: usize,
    pub bzero: f64,
    pub bscale: f64,
    /// Integer null value (`BLANK`), decoded as NaN.
    pub blank: Option<i64>,
}

impl ImageLayout {
    /// Validate the image shape and derive the 2-D layout.
    ///
    /// `shape` is in row-major order as `fitsio` reports it (last entry is
    /// `NAXIS1`). Axes beyond the second must have length 1 so the array
    /// squeezes to `(NAXIS2, NAXIS1)`.
    pub fn new(shape: &[usize], header: &Header) -> Result<Self> {
        let bitpix = header
            .get_i64("BITPIX")
            .ok_or_else(|| FitsViewError::MissingKeyword("BITPIX".into()))?;
        let bitpix = BitPix::from_code(bitpix)?;

        if shape.len() < 2 {
            return Err(FitsViewError::UnsupportedAxes(format!(
                "NAXIS = {}, need a 2-D image",
                shape.len()
            )));
        }

        let axes: Vec<usize> = shape.iter().rev().copied().collect();
        if let Some((i, len)) = axes.iter().enumerate().skip(2).find(|&(_, &len)| len != 1) {
            return Err(FitsViewError::UnsupportedAxes(format!(
                "NAXIS{} = {len}, only singleton axes beyond NAXIS2 can be squeezed",
                i + 1
            )));
        }

        let (width, height) = (axes[0], axes[1]);
        if width == 0 || height == 0 {
            return Err(FitsViewError::UnsupportedAxes(format!(
                "empty image {width}x{height}"
            )));
        }

        Ok(Self {
            bitpix,
            width,
            height,
            bzero: header.get_f64("BZERO").unwrap_or(0.0),
            bscale: header.get_f64("BSCALE").unwrap_or(1.0),
            blank: if bitpix.is_float() {
                None
            } else {
                header.get_i64("BLANK")
            },
        })
    }

    pub fn pixel_count(&self) -> Result<usize> {
        self.width.checked_mul(self.height).ok_or_else(|| {
            FitsViewError::InvalidFits(format!(
                "{}x{} pixels overflow the address space",
                self.width, self.height
            ))
        })
    }

    /// Size of the data unit in bytes, without block padding.
    pub fn data_byte_size(&self) -> Result<u64> {
        let pixels = self.pixel_count()? as u64;
        pixels
            .checked_mul(self.bitpix.bytes_per_sample() as u64)
            .ok_or_else(|| {
                FitsViewError::InvalidFits(format!(
                    "{}x{} BITPIX={} data unit overflows",
                    self.width,
                    self.height,
                    self.bitpix.code()
                ))
            })
    }

    /// Physical value cfitsio produces for a stored `BLANK` sample.
    fn blank_value(&self) -> Option<f64> {
        self.blank.map(|b| b as f64 * self.bscale + self.bzero)
    }
}

/// Reader for the primary HDU of a FITS file.
///
/// Opening reads the header and validates the layout. Pixels are only read
/// by `read_image`.
pub struct FitsReader {
    fptr: FitsFile,
    hdu: FitsHdu,
    pub header: Header,
    pub layout: ImageLayout,
}

impl FitsReader {
    /// Open a FITS file and read its primary header.
    pub fn open(path: &Path) -> Result<Self> {
        let file_len = std::fs::metadata(path)?.len();
        let mut fptr = FitsFile::open(path)?;
        let hdu = fptr.primary_hdu()?;

        let shape = match &hdu.info {
            HduInfo::ImageInfo { shape, .. } => shape.clone(),
            HduInfo::TableInfo { .. } => {
                return Err(FitsViewError::InvalidFits(
                    "primary HDU is a table, not an image".into(),
                ))
            }
            HduInfo::AnyInfo => {
                return Err(FitsViewError::InvalidFits("unknown primary HDU type".into()))
            }
        };

        let header = Header::from_cards(records::read_cards(&mut fptr)?);
        let layout = ImageLayout::new(&shape, &header)?;

        let expected = layout.data_byte_size()?;
        if expected > file_len {
            return Err(FitsViewError::InvalidFits(format!(
                "File truncated: data unit needs {expected} bytes, file has {file_len}"
            )));
        }

        debug!(
            "FITS header: {} cards, {}x{} BITPIX={}",
            header.len(),
            layout.width,
            layout.height,
            layout.bitpix.code()
        );

        Ok(Self {
            fptr,
            hdu,
            header,
            layout,
        })
    }

    /// Read the pixels as physical values.
    ///
    /// cfitsio applies BZERO/BSCALE; stored BLANK samples become NaN.
    pub fn read_image(&mut self) -> Result<FitsImage> {
        let mut values: Vec<f64> = self.hdu.read_image(&mut self.fptr)?;
        let expected = self.layout.pixel_count()?;
        if values.len() != expected {
            return Err(FitsViewError::InvalidFits(format!(
                "read {} pixels, header describes {expected}",
                values.len()
            )));
        }

        if let Some(blank) = self.layout.blank_value() {
            values
                .iter_mut()
                .filter(|v| **v == blank)
                .for_each(|v| *v = f64::NAN);
        }

        let data = Array2::from_shape_vec((self.layout.height, self.layout.width), values)
            .map_err(|e| FitsViewError::InvalidFits(format!("Data shape mismatch: {e}")))?;
        Ok(FitsImage::new(data, self.header.clone(), self.layout.bitpix))
    }

    /// Build SourceInfo from the header without reading pixels.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo::from_header(
            path,
            &self.header,
            self.layout.width,
            self.layout.height,
            self.layout.bitpix,
        )
    }
}

/// Load the primary image of a FITS file.
pub fn load_fits(path: &Path) -> Result<FitsImage> {
    let mut reader = FitsReader::open(path)?;
    let image = reader.read_image()?;
    info!(
        "Loaded {} ({}x{}, BITPIX={})",
        path.display(),
        image.width(),
        image.height(),
        image.bitpix.code()
    );
    Ok(image)
}
