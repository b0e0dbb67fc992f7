/// cfitsio buffer sizes, terminating NUL included.
pub const CARD_BUFFER_LEN: usize = 81;
pub const KEYNAME_BUFFER_LEN: usize = 75;
pub const VALUE_BUFFER_LEN: usize = 71;
pub const COMMENT_BUFFER_LEN: usize = 73;

/// Longest string value that fits on a single card between the quotes.
pub const MAX_STRING_VALUE_LEN: usize = 68;

/// Significant digits for real keyword values (negative selects `%G`).
pub const REAL_KEY_DECIMALS: i32 = -15;

/// Degrees to arcseconds.
pub const DEGREES_TO_ARCSEC: f64 = 3600.0;

/// Default lower display percentile.
pub const DEFAULT_VMIN_PERCENTILE: f64 = 5.0;

/// Default upper display percentile.
pub const DEFAULT_VMAX_PERCENTILE: f64 = 95.0;

/// Minimum pixel count (h*w) to render rows in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of bins in the pixel value histogram shown next to the
/// normalization controls.
pub const HISTOGRAM_BINS: usize = 128;
