use std::path::Path;

use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FitsViewError, Result};
use crate::image::FitsImage;
use crate::io::fits_writer::write_fits;
use crate::roi::Roi;

/// Export options for ROI crops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Shift `CRPIX1`/`CRPIX2` by the crop origin so the WCS stays aligned.
    pub shift_reference_pixel: bool,
}

/// Slice `image` to `roi`, returning a new image with an adjusted header.
///
/// The copy's `NAXIS1` is the column count and `NAXIS2` the row count of
/// the slice. No other keyword changes unless `options` asks for it.
pub fn crop_image(image: &FitsImage, roi: &Roi, options: &CropOptions) -> Result<FitsImage> {
    let b = roi.bounds(image.width(), image.height())?;

    let data = image
        .data
        .slice(s![b.y_start..b.y_end, b.x_start..b.x_end])
        .to_owned();

    let mut header = image.header.clone();
    header.set("NAXIS1", data.ncols());
    header.set("NAXIS2", data.nrows());

    if options.shift_reference_pixel {
        for (key, offset) in [("CRPIX1", b.x_start), ("CRPIX2", b.y_start)] {
            if let Some(crpix) = header.get_f64(key) {
                header.set(key, crpix - offset as f64);
            }
        }
    }

    debug!(
        "Cropped {}x{} -> {}x{} at ({}, {})",
        image.width(),
        image.height(),
        data.ncols(),
        data.nrows(),
        b.x_start,
        b.y_start
    );

    Ok(FitsImage::new(data, header, image.bitpix))
}

/// Crop the loaded image to the stored ROI and write it to `path`.
///
/// Fails with [`FitsViewError::NoImage`] or [`FitsViewError::NoRoi`] when a
/// precondition is missing; nothing is written in that case.
pub fn export_roi(
    path: &Path,
    image: Option<&FitsImage>,
    roi: Option<&Roi>,
    options: &CropOptions,
) -> Result<FitsImage> {
    let image = image.ok_or(FitsViewError::NoImage)?;
    let roi = roi.ok_or(FitsViewError::NoRoi)?;

    let cropped = crop_image(image, roi, options)?;
    write_fits(path, &cropped)?;
    info!("ROI {roi} saved as {}", path.display());
    Ok(cropped)
}
