use std::path::PathBuf;

use fitsview_core::config::ViewerConfig;
use fitsview_core::image::FitsImage;
use image::RgbImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read and decode a FITS file.
    LoadFile { path: PathBuf },

    /// Write an already-cropped ROI image.
    SaveRoi { path: PathBuf, image: FitsImage },

    /// Write the rendered view as PNG.
    SaveView { path: PathBuf, rgb: RgbImage },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// The worker picked up a command; a result for it follows.
    Started {
        task: String,
    },
    FileLoaded {
        path: PathBuf,
        image: FitsImage,
    },
    RoiSaved {
        path: PathBuf,
    },
    ViewSaved {
        path: PathBuf,
    },
    ConfigImported {
        config: ViewerConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}

impl WorkerCommand {
    /// Status-line text while the command runs.
    pub fn task_label(&self) -> &'static str {
        match self {
            Self::LoadFile { .. } => "Loading file",
            Self::SaveRoi { .. } => "Saving ROI",
            Self::SaveView { .. } => "Saving view",
        }
    }
}
