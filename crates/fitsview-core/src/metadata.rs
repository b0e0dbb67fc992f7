//! Read-only lookups of well-known header keywords.
//!
//! Every query reads the live header; nothing is cached.

use std::fmt;

use crate::consts::DEGREES_TO_ARCSEC;
use crate::header::Header;

/// Rest frequency in Hz (`RESTFRQ`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frequency(pub Option<f64>);

/// Clean beam major/minor axes and position angle, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamGeometry {
    pub major: f64,
    pub minor: f64,
    pub position_angle: f64,
}

/// `BMAJ`/`BMIN`/`BPA`, present only when all three are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CleanBeam(pub Option<BeamGeometry>);

/// Pixel size in arcsec along each axis, sign preserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelScale(pub Option<(f64, f64)>);

pub fn frequency(header: &Header) -> Frequency {
    Frequency(header.get_f64("RESTFRQ"))
}

pub fn clean_beam(header: &Header) -> CleanBeam {
    let beam = match (
        header.get_f64("BMAJ"),
        header.get_f64("BMIN"),
        header.get_f64("BPA"),
    ) {
        (Some(major), Some(minor), Some(position_angle)) => Some(BeamGeometry {
            major,
            minor,
            position_angle,
        }),
        _ => None,
    };
    CleanBeam(beam)
}

pub fn pixel_scale(header: &Header) -> PixelScale {
    let scale = match (header.get_f64("CDELT1"), header.get_f64("CDELT2")) {
        (Some(x), Some(y)) => Some((x * DEGREES_TO_ARCSEC, y * DEGREES_TO_ARCSEC)),
        _ => None,
    };
    PixelScale(scale)
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(hz) => write!(f, "Frequency: {hz} Hz"),
            None => write!(f, "No frequency information available."),
        }
    }
}

impl fmt::Display for CleanBeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(b) => write!(
                f,
                "Clean Beam: Major={} deg, Minor={} deg, PA={} deg",
                b.major, b.minor, b.position_angle
            ),
            None => write!(f, "No clean beam information available."),
        }
    }
}

impl fmt::Display for PixelScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((x, y)) => write!(f, "Pixel Scale: {x} arcsec/pixel, {y} arcsec/pixel"),
            None => write!(f, "No pixel scale information available."),
        }
    }
}
