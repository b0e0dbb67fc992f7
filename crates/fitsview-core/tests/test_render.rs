use ndarray::{array, Array2};
use tempfile::tempdir;

use fitsview_core::error::FitsViewError;
use fitsview_core::normalize::{NormBounds, ScaleMode};
use fitsview_core::render::{histogram, render_rgb, save_png, Colormap, BAD_COLOR};
use fitsview_core::roi::DisplayOrigin;

fn unit_bounds() -> NormBounds {
    NormBounds {
        low: 0.0,
        high: 1.0,
        mode: ScaleMode::Linear,
    }
}

#[test]
fn test_colormap_endpoints() {
    assert_eq!(Colormap::Gray.map(0.0), [0, 0, 0]);
    assert_eq!(Colormap::Gray.map(1.0), [255, 255, 255]);
    // rainbow: violet-ish blue at 0, green peak at 0.5, red at 1
    assert_eq!(Colormap::Rainbow.map(0.0), [255, 0, 255]);
    assert_eq!(Colormap::Rainbow.map(0.5), [0, 255, 180]);
    assert_eq!(Colormap::Rainbow.map(1.0), [255, 0, 0]);
    assert_eq!(Colormap::Rainbow.map(2.0), Colormap::Rainbow.map(1.0));
    assert_eq!(Colormap::default(), Colormap::Rainbow);
}

#[test]
fn test_render_origin_lower_puts_row0_at_bottom() {
    let data = array![[0.0, 0.0], [1.0, 1.0]];
    let img = render_rgb(&data, &unit_bounds(), Colormap::Gray, DisplayOrigin::Lower);
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0]);

    let img = render_rgb(&data, &unit_bounds(), Colormap::Gray, DisplayOrigin::Upper);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(img.get_pixel(0, 1).0, [255, 255, 255]);
}

#[test]
fn test_render_bad_pixels() {
    let data = array![[f64::NAN, 0.5]];
    let img = render_rgb(&data, &unit_bounds(), Colormap::Rainbow, DisplayOrigin::Upper);
    assert_eq!(img.get_pixel(0, 0).0, BAD_COLOR);
    assert_ne!(img.get_pixel(1, 0).0, BAD_COLOR);
}

#[test]
fn test_render_large_image_parallel_matches_layout() {
    let (h, w) = (300, 400);
    let data = Array2::from_shape_fn((h, w), |(y, _)| y as f64 / (h - 1) as f64);
    let img = render_rgb(&data, &unit_bounds(), Colormap::Gray, DisplayOrigin::Lower);
    assert_eq!(img.dimensions(), (w as u32, h as u32));
    assert_eq!(img.get_pixel(10, 0).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(10, (h - 1) as u32).0, [0, 0, 0]);
}

#[test]
fn test_save_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("view.png");
    let data = array![[0.0, 0.5], [0.75, 1.0]];
    let img = render_rgb(&data, &unit_bounds(), Colormap::Gray, DisplayOrigin::Upper);
    save_png(&img, &path).unwrap();

    let back = image::open(&path).unwrap().to_rgb8();
    assert_eq!(back, img);
}

#[test]
fn test_histogram_counts() {
    let data = array![[0.0, 1.0, 2.0, 3.0], [4.0, f64::NAN, 4.0, 4.0]];
    let hist = histogram(&data, 4).unwrap();
    assert_eq!(hist.min, 0.0);
    assert_eq!(hist.max, 4.0);
    assert_eq!(hist.counts, vec![1, 1, 1, 4]);
    assert_eq!(hist.counts.iter().sum::<u64>(), 7);
    assert_eq!(hist.bin_center(0), 0.5);
}

#[test]
fn test_histogram_constant_and_empty() {
    let hist = histogram(&Array2::from_elem((3, 3), 2.0), 8).unwrap();
    assert_eq!(hist.counts[0], 9);

    let err = histogram(&array![[f64::NAN]], 8).unwrap_err();
    assert!(matches!(err, FitsViewError::EmptyImage));
}
