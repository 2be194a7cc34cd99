#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

/// An image whose every pixel differs from its neighbours, so misplaced
/// tiles or misaligned blends show up as pixel differences.
pub fn pattern_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x.wrapping_mul(31) ^ y) as u8,
            (y.wrapping_mul(17) ^ x) as u8,
            (x + y) as u8,
        ])
    })
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    pattern_image(width, height)
        .save(path)
        .expect("write png file");
}
