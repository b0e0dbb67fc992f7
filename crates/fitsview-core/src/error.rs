use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitsViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FITS library error: {0}")]
    Fits(#[from] fitsio::errors::Error),

    #[error("Invalid FITS file: {0}")]
    InvalidFits(String),

    #[error("Unsupported BITPIX: {0}")]
    UnsupportedBitpix(i64),

    #[error("Unsupported axis layout: {0}")]
    UnsupportedAxes(String),

    #[error("Missing required keyword: {0}")]
    MissingKeyword(String),

    #[error("Header does not match data: {0}")]
    HeaderMismatch(String),

    #[error("Invalid percentile value: {0:?}")]
    InvalidPercentile(String),

    #[error("Percentile values must be between 0 and 100 (got {0})")]
    PercentileOutOfRange(f64),

    #[error("Lower percentile {vmin} is above upper percentile {vmax}")]
    PercentileOrder { vmin: f64, vmax: f64 },

    #[error("Log normalization requires all values to be positive (found {0})")]
    LogScaleDomain(f64),

    #[error("Image has no finite pixel values")]
    EmptyImage,

    #[error("No image loaded")]
    NoImage,

    #[error("No region of interest selected")]
    NoRoi,

    #[error("Region of interest is empty: {0}")]
    EmptyRoi(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FitsViewError>;
