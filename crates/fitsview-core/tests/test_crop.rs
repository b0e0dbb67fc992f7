mod common;

use ndarray::{s, Array2};
use tempfile::tempdir;

use fitsview_core::crop::{crop_image, export_roi, CropOptions};
use fitsview_core::error::FitsViewError;
use fitsview_core::image::FitsImage;
use fitsview_core::io::fits::load_fits;
use fitsview_core::roi::Roi;

use common::{block_image, ramp_image};

#[test]
fn test_crop_block_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roi.fits");
    let image = block_image();

    export_roi(
        &path,
        Some(&image),
        Some(&Roi::new(40, 50, 40, 50)),
        &CropOptions::default(),
    )
    .unwrap();

    let back = load_fits(&path).unwrap();
    assert_eq!(back.data.dim(), (10, 10));
    assert!(back.data.iter().all(|&v| v == 100.0));
    assert_eq!(back.header.get_i64("NAXIS1"), Some(10));
    assert_eq!(back.header.get_i64("NAXIS2"), Some(10));
}

#[test]
fn test_crop_rows_are_y_columns_are_x() {
    let image = ramp_image(8, 6);
    let cropped = crop_image(&image, &Roi::new(2, 5, 1, 3), &CropOptions::default()).unwrap();

    assert_eq!(cropped.width(), 3);
    assert_eq!(cropped.height(), 2);
    assert_eq!(cropped.data, image.data.slice(s![1..3, 2..5]));
    assert_eq!(cropped.header.get_i64("NAXIS1"), Some(3));
    assert_eq!(cropped.header.get_i64("NAXIS2"), Some(2));
}

#[test]
fn test_crop_full_extent_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("full.fits");

    let mut image = ramp_image(13, 7);
    image.header.set("OBJECT", "ramp");
    export_roi(
        &path,
        Some(&image),
        Some(&Roi::new(0, 13, 0, 7)),
        &CropOptions::default(),
    )
    .unwrap();

    let back = load_fits(&path).unwrap();
    assert_eq!(back.data, image.data);
    assert_eq!(back.header.get_i64("NAXIS1"), image.header.get_i64("NAXIS1"));
    assert_eq!(back.header.get_i64("NAXIS2"), image.header.get_i64("NAXIS2"));
    assert_eq!(back.header, image.header);
}

#[test]
fn test_crop_reverse_and_overhanging_drag() {
    let image = ramp_image(10, 10);
    let cropped = crop_image(&image, &Roi::new(12, 7, 3, -4), &CropOptions::default()).unwrap();
    assert_eq!(cropped.data, image.data.slice(s![0..3, 7..10]));
}

#[test]
fn test_crop_keeps_other_keywords() {
    let mut image = ramp_image(10, 10);
    image.header.set("CRPIX1", 5.0);
    image.header.set("BUNIT", "Jy/beam");

    let cropped = crop_image(&image, &Roi::new(2, 6, 3, 9), &CropOptions::default()).unwrap();
    assert_eq!(cropped.header.get_f64("CRPIX1"), Some(5.0));
    assert_eq!(cropped.header.get_str("BUNIT"), Some("Jy/beam"));
    assert_eq!(cropped.header.len(), image.header.len());
    // Source header untouched.
    assert_eq!(image.header.get_i64("NAXIS1"), Some(10));
}

#[test]
fn test_crop_shift_reference_pixel() {
    let mut image = ramp_image(10, 10);
    image.header.set("CRPIX1", 5.0);
    image.header.set("CRPIX2", 6.5);

    let options = CropOptions {
        shift_reference_pixel: true,
    };
    let cropped = crop_image(&image, &Roi::new(2, 6, 3, 9), &options).unwrap();
    assert_eq!(cropped.header.get_f64("CRPIX1"), Some(3.0));
    assert_eq!(cropped.header.get_f64("CRPIX2"), Some(3.5));
}

#[test]
fn test_crop_empty_roi() {
    let image = ramp_image(10, 10);
    let err = crop_image(&image, &Roi::new(4, 4, 0, 10), &CropOptions::default()).unwrap_err();
    assert!(matches!(err, FitsViewError::EmptyRoi(_)));
}

#[test]
fn test_export_requires_image_and_roi() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.fits");
    let image = FitsImage::from_array(Array2::zeros((4, 4)));

    let err = export_roi(&path, None, Some(&Roi::new(0, 2, 0, 2)), &CropOptions::default())
        .unwrap_err();
    assert!(matches!(err, FitsViewError::NoImage));

    let err = export_roi(&path, Some(&image), None, &CropOptions::default()).unwrap_err();
    assert!(matches!(err, FitsViewError::NoRoi));

    assert!(!path.exists());
}
