use approx::assert_abs_diff_eq;

use fitsview_core::header::Header;
use fitsview_core::metadata::{clean_beam, frequency, pixel_scale, BeamGeometry};

fn header_with(cards: &[(&str, f64)]) -> Header {
    let mut h = Header::new();
    h.set("SIMPLE", true);
    for &(k, v) in cards {
        h.set(k, v);
    }
    h
}

#[test]
fn test_frequency_present() {
    let h = header_with(&[("RESTFRQ", 2.30538e11)]);
    let f = frequency(&h);
    assert_eq!(f.0, Some(2.30538e11));
    assert_eq!(f.to_string(), "Frequency: 230538000000 Hz");
}

#[test]
fn test_frequency_missing_or_text() {
    let mut h = header_with(&[]);
    assert_eq!(frequency(&h).0, None);
    assert_eq!(frequency(&h).to_string(), "No frequency information available.");

    h.set("RESTFRQ", "unknown");
    assert_eq!(frequency(&h).0, None);
}

#[test]
fn test_clean_beam_all_present() {
    let h = header_with(&[("BMAJ", 0.001), ("BMIN", 0.0005), ("BPA", -30.0)]);
    let beam = clean_beam(&h);
    assert_eq!(
        beam.0,
        Some(BeamGeometry {
            major: 0.001,
            minor: 0.0005,
            position_angle: -30.0
        })
    );
    assert_eq!(
        beam.to_string(),
        "Clean Beam: Major=0.001 deg, Minor=0.0005 deg, PA=-30 deg"
    );
}

#[test]
fn test_clean_beam_partial_is_unavailable() {
    let h = header_with(&[("BMAJ", 0.001), ("BPA", 45.0)]);
    let beam = clean_beam(&h);
    assert_eq!(beam.0, None);
    assert_eq!(beam.to_string(), "No clean beam information available.");
}

#[test]
fn test_pixel_scale_arcsec() {
    let h = header_with(&[("CDELT1", -0.0002778), ("CDELT2", 0.0002778)]);
    let (x, y) = pixel_scale(&h).0.unwrap();
    assert_abs_diff_eq!(x, -1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(y, 1.0, epsilon = 1e-3);
    assert!(pixel_scale(&h).to_string().starts_with("Pixel Scale: -1.00008"));
}

#[test]
fn test_pixel_scale_needs_both_axes() {
    let h = header_with(&[("CDELT1", 0.001)]);
    assert_eq!(pixel_scale(&h).0, None);
    assert_eq!(
        pixel_scale(&h).to_string(),
        "No pixel scale information available."
    );
}

#[test]
fn test_integer_keyword_values_accepted() {
    let mut h = header_with(&[]);
    h.set("RESTFRQ", 1_420_405_752i64);
    assert_eq!(frequency(&h).0, Some(1_420_405_752.0));
}
