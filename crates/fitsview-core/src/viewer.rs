use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{info, warn};

use crate::config::ViewerConfig;
use crate::crop::{crop_image, export_roi, CropOptions};
use crate::error::{FitsViewError, Result};
use crate::image::FitsImage;
use crate::io::fits::load_fits;
use crate::metadata::{self, CleanBeam, Frequency, PixelScale};
use crate::normalize::{compute_bounds, parse_percentile, NormBounds, NormalizationState, ScaleMode};
use crate::render::{render_rgb, Colormap};
use crate::roi::{DisplayOrigin, Roi, RoiSelector};

/// The image currently open in the viewer.
#[derive(Clone, Debug)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub image: FitsImage,
}

/// Application state behind every user command.
///
/// At most one image is loaded. Operations that fail leave the state as it
/// was before the call.
#[derive(Debug, Default)]
pub struct Viewer {
    file: Option<LoadedFile>,
    normalization: NormalizationState,
    bounds: Option<NormBounds>,
    selector: RoiSelector,
    pub colormap: Colormap,
    pub origin: DisplayOrigin,
    pub export: CropOptions,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ViewerConfig) -> Self {
        Self {
            normalization: config.normalization,
            colormap: config.colormap,
            origin: config.origin,
            export: config.export,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ViewerConfig {
        ViewerConfig {
            normalization: self.normalization,
            colormap: self.colormap,
            origin: self.origin,
            export: self.export,
        }
    }

    /// Replace display and export settings. The normalization is validated
    /// against the loaded image first.
    pub fn apply_config(&mut self, config: &ViewerConfig) -> Result<()> {
        self.set_normalization(config.normalization)?;
        self.colormap = config.colormap;
        self.origin = config.origin;
        self.export = config.export;
        Ok(())
    }

    /// Load a FITS file and make it the current image.
    ///
    /// A read failure leaves the viewer untouched. A display failure (see
    /// `set_image`) is returned after the image has been installed.
    pub fn open(&mut self, path: &Path) -> Result<&FitsImage> {
        let image = load_fits(path)?;
        self.set_image(path.to_path_buf(), image)?;
        self.image().ok_or(FitsViewError::NoImage)
    }

    /// Install an already-decoded image, dropping any ROI and recomputing
    /// display bounds.
    ///
    /// The normalization state is never changed here. If it cannot be
    /// applied to the new data (log mode over values <= 0) the image is still
    /// installed without bounds, so nothing is drawn, and the error is
    /// returned for the caller to report.
    pub fn set_image(&mut self, path: PathBuf, image: FitsImage) -> Result<()> {
        let bounds = compute_bounds(&image.data, &self.normalization);
        if let Err(ref e) = bounds {
            warn!("Not drawing {}: {e}", path.display());
        }

        self.selector.clear();
        self.file = Some(LoadedFile { path, image });
        self.bounds = bounds.as_ref().ok().copied();
        bounds.map(|_| ())
    }

    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    pub fn image(&self) -> Option<&FitsImage> {
        self.file.as_ref().map(|f| &f.image)
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    pub fn normalization(&self) -> &NormalizationState {
        &self.normalization
    }

    /// Bounds of the current display, if an image is shown.
    pub fn bounds(&self) -> Option<&NormBounds> {
        self.bounds.as_ref()
    }

    /// Parse the dialog's text fields and apply them.
    pub fn apply_normalization(
        &mut self,
        mode: ScaleMode,
        vmin_text: &str,
        vmax_text: &str,
    ) -> Result<Option<NormBounds>> {
        let state = NormalizationState {
            mode,
            vmin_percentile: parse_percentile(vmin_text)?,
            vmax_percentile: parse_percentile(vmax_text)?,
        };
        self.set_normalization(state)
    }

    /// Validate `state`, recompute bounds and commit both on success.
    ///
    /// With no image loaded the state is only validated and stored.
    pub fn set_normalization(&mut self, state: NormalizationState) -> Result<Option<NormBounds>> {
        state.validate()?;
        let bounds = match self.image() {
            Some(image) => Some(compute_bounds(&image.data, &state)?),
            None => None,
        };
        self.normalization = state;
        if bounds.is_some() {
            self.bounds = bounds;
        }
        Ok(bounds)
    }

    /// Render the current image with the current settings.
    pub fn render(&self) -> Option<RgbImage> {
        let image = self.image()?;
        let bounds = self.bounds.as_ref()?;
        Some(render_rgb(&image.data, bounds, self.colormap, self.origin))
    }

    /// Header cards as text, one per line.
    pub fn header_text(&self) -> Option<String> {
        self.image().map(|image| image.header.to_card_text())
    }

    pub fn selector(&self) -> &RoiSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut RoiSelector {
        &mut self.selector
    }

    pub fn roi(&self) -> Option<Roi> {
        self.selector.roi()
    }

    /// Store a selection directly, bypassing the drag gesture.
    pub fn set_roi(&mut self, roi: Roi) {
        self.selector = RoiSelector::Selected(roi);
    }

    /// Crop the loaded image to the current ROI without writing it.
    pub fn crop_selection(&self) -> Result<FitsImage> {
        let image = self.image().ok_or(FitsViewError::NoImage)?;
        let roi = self.roi().ok_or(FitsViewError::NoRoi)?;
        crop_image(image, &roi, &self.export)
    }

    /// Crop to the current ROI and write the result to `path`.
    pub fn save_roi(&self, path: &Path) -> Result<FitsImage> {
        let roi = self.roi();
        export_roi(path, self.image(), roi.as_ref(), &self.export)
    }

    pub fn frequency(&self) -> Result<Frequency> {
        let image = self.image().ok_or(FitsViewError::NoImage)?;
        Ok(metadata::frequency(&image.header))
    }

    pub fn clean_beam(&self) -> Result<CleanBeam> {
        let image = self.image().ok_or(FitsViewError::NoImage)?;
        Ok(metadata::clean_beam(&image.header))
    }

    pub fn pixel_scale(&self) -> Result<PixelScale> {
        let image = self.image().ok_or(FitsViewError::NoImage)?;
        Ok(metadata::pixel_scale(&image.header))
    }

    /// Pixel value under array coordinates, for the cursor readout.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.image()?.value_at(x as usize, y as usize)
    }

    /// Drop the loaded image and selection.
    pub fn close(&mut self) {
        if let Some(file) = self.file.take() {
            info!("Closed {}", file.path.display());
        }
        self.bounds = None;
        self.selector.clear();
    }
}
