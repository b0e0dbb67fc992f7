#![allow(dead_code)]

use std::io::Write;

use fitsview_core::image::FitsImage;
use ndarray::Array2;

const BLOCK: usize = 2880;

/// Format one 80-byte header record with a fixed-format value.
pub fn card(keyword: &str, value: &str) -> String {
    format!("{:<80}", format!("{keyword:<8}= {value:>20}"))
}

/// Build a complete FITS file: structural cards, `extra` cards, END,
/// padding, and the raw big-endian `data` padded to a block boundary.
pub fn build_fits(bitpix: i64, axes: &[usize], extra: &[String], data: &[u8]) -> Vec<u8> {
    let mut header = String::new();
    header.push_str(&card("SIMPLE", "T"));
    header.push_str(&card("BITPIX", &bitpix.to_string()));
    header.push_str(&card("NAXIS", &axes.len().to_string()));
    for (i, len) in axes.iter().enumerate() {
        header.push_str(&card(&format!("NAXIS{}", i + 1), &len.to_string()));
    }
    for c in extra {
        header.push_str(c);
    }
    header.push_str(&format!("{:<80}", "END"));
    while header.len() % BLOCK != 0 {
        header.push(' ');
    }

    let mut buf = header.into_bytes();
    buf.extend_from_slice(data);
    while buf.len() % BLOCK != 0 {
        buf.push(0);
    }
    buf
}

/// BITPIX -64 file holding `values` in row-major order.
pub fn build_fits_f64(width: usize, height: usize, values: &[f64], extra: &[String]) -> Vec<u8> {
    assert_eq!(values.len(), width * height);
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    build_fits(-64, &[width, height], extra, &data)
}

/// BITPIX 16 file holding raw stored `values`.
pub fn build_fits_i16(width: usize, height: usize, values: &[i16], extra: &[String]) -> Vec<u8> {
    assert_eq!(values.len(), width * height);
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    build_fits(16, &[width, height], extra, &data)
}

/// Write bytes to a temporary file and return the handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write FITS data");
    f.flush().expect("flush");
    f
}

/// 100x100 image of 1.0 with a 10x10 block of 100.0 at rows/cols 40..50.
pub fn block_image() -> FitsImage {
    let mut data = Array2::<f64>::ones((100, 100));
    for y in 40..50 {
        for x in 40..50 {
            data[[y, x]] = 100.0;
        }
    }
    FitsImage::from_array(data)
}

/// Image whose pixel at (x, y) holds `y * width + x + 1`.
pub fn ramp_image(width: usize, height: usize) -> FitsImage {
    let data = Array2::from_shape_fn((height, width), |(y, x)| (y * width + x + 1) as f64);
    FitsImage::from_array(data)
}
