use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FitsViewError, Result};

/// A point in display coordinates, in the same units as the image pixels.
pub type Point = (f64, f64);

/// A region of interest as drawn: `(x1, x2, y1, y2)` pixel indices.
///
/// Corners are stored in gesture order, neither sorted nor clamped.
/// Use [`Roi::bounds`] to obtain a sliceable region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

impl Roi {
    pub fn new(x1: i64, x2: i64, y1: i64, y2: i64) -> Self {
        Self { x1, x2, y1, y2 }
    }

    /// Build from press and release points, truncating toward zero.
    pub fn from_corners(press: Point, release: Point) -> Self {
        Self {
            x1: press.0.trunc() as i64,
            x2: release.0.trunc() as i64,
            y1: press.1.trunc() as i64,
            y2: release.1.trunc() as i64,
        }
    }

    /// Order each axis and clamp to a `width` x `height` array.
    pub fn bounds(&self, width: usize, height: usize) -> Result<PixelBounds> {
        let clamp_x = |v: i64| v.clamp(0, width as i64) as usize;
        let clamp_y = |v: i64| v.clamp(0, height as i64) as usize;

        let bounds = PixelBounds {
            x_start: clamp_x(self.x1.min(self.x2)),
            x_end: clamp_x(self.x1.max(self.x2)),
            y_start: clamp_y(self.y1.min(self.y2)),
            y_end: clamp_y(self.y1.max(self.y2)),
        };

        if bounds.width() == 0 || bounds.height() == 0 {
            return Err(FitsViewError::EmptyRoi(format!(
                "{self} covers no pixels of a {width}x{height} image"
            )));
        }
        Ok(bounds)
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.x2, self.y1, self.y2)
    }
}

impl std::str::FromStr for Roi {
    type Err = String;

    /// Parse `x1,x2,y1,y2`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected x1,x2,y1,y2, got '{s}'"));
        }
        let mut v = [0i64; 4];
        for (slot, part) in v.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("invalid ROI coordinate '{part}'"))?;
        }
        Ok(Self::new(v[0], v[1], v[2], v[3]))
    }
}

/// Ordered, clamped, non-empty half-open pixel ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl PixelBounds {
    pub fn width(&self) -> usize {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> usize {
        self.y_end - self.y_start
    }
}

/// Rectangle drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RoiSelector {
    #[default]
    Idle,
    Dragging {
        start: Point,
        current: Point,
        /// Selection to restore if the gesture is cancelled.
        previous: Option<Roi>,
    },
    Selected(Roi),
}

impl RoiSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new gesture. Any previous selection is set aside.
    pub fn press(&mut self, p: Point) {
        let previous = match *self {
            Self::Selected(roi) => Some(roi),
            Self::Dragging { previous, .. } => previous,
            Self::Idle => None,
        };
        *self = Self::Dragging {
            start: p,
            current: p,
            previous,
        };
    }

    /// Move the live corner. Ignored unless dragging.
    pub fn drag(&mut self, p: Point) {
        if let Self::Dragging { current, .. } = self {
            *current = p;
        }
    }

    /// Finish the gesture and return the completed selection.
    pub fn release(&mut self, p: Point) -> Option<Roi> {
        let Self::Dragging { start, .. } = *self else {
            return None;
        };
        let roi = Roi::from_corners(start, p);
        debug!("ROI selected: {roi}");
        *self = Self::Selected(roi);
        Some(roi)
    }

    /// Abandon an in-progress drag, restoring the prior selection.
    pub fn cancel(&mut self) {
        if let Self::Dragging { previous, .. } = *self {
            *self = previous.map_or(Self::Idle, Self::Selected);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// The committed selection, if any.
    pub fn roi(&self) -> Option<Roi> {
        match *self {
            Self::Selected(roi) => Some(roi),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Corners of the rectangle being drawn.
    pub fn live_corners(&self) -> Option<(Point, Point)> {
        match *self {
            Self::Dragging { start, current, .. } => Some((start, current)),
            _ => None,
        }
    }
}

/// Where row 0 of the array is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayOrigin {
    /// Row 0 at the bottom (astronomical convention).
    #[default]
    Lower,
    /// Row 0 at the top.
    Upper,
}

impl DisplayOrigin {
    pub const ALL: &'static [DisplayOrigin] = &[DisplayOrigin::Lower, DisplayOrigin::Upper];

    /// Map a fraction of the displayed rectangle (measured from its top-left)
    /// to pixel coordinates.
    pub fn display_to_pixel(&self, fx: f64, fy: f64, width: usize, height: usize) -> Point {
        let x = fx * width as f64;
        let y = match self {
            Self::Lower => (1.0 - fy) * height as f64,
            Self::Upper => fy * height as f64,
        };
        (x, y)
    }

    /// Inverse of [`display_to_pixel`](Self::display_to_pixel).
    pub fn pixel_to_display(&self, x: f64, y: f64, width: usize, height: usize) -> (f64, f64) {
        let fx = x / width as f64;
        let fy = match self {
            Self::Lower => 1.0 - y / height as f64,
            Self::Upper => y / height as f64,
        };
        (fx, fy)
    }

    /// Array row shown at `display_row` (counted from the top).
    pub fn source_row(&self, display_row: usize, height: usize) -> usize {
        match self {
            Self::Lower => height - 1 - display_row,
            Self::Upper => display_row,
        }
    }
}

impl fmt::Display for DisplayOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "Lower"),
            Self::Upper => write!(f, "Upper"),
        }
    }
}

impl std::str::FromStr for DisplayOrigin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            other => Err(format!("unknown origin '{other}' (expected lower or upper)")),
        }
    }
}
