//! Shared test utilities for the square-thumb test suite.
//!
//! Provides synthetic image generators so tests never depend on fixture
//! files on disk. Images carry a horizontal gradient, which makes padding
//! pixels distinguishable from image content in assertions.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

/// An `w`x`h` gradient image as an in-memory buffer.
fn gradient(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        let r = (x * 255 / w.max(1)) as u8;
        let g = (y * 255 / h.max(1)) as u8;
        image::Rgb([r, g, 128])
    })
}

/// JPEG-encoded gradient image of the given dimensions.
pub fn jpeg_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = gradient(w, h);
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, 90);
    img.write_with_encoder(encoder).unwrap();
    buf
}

/// PNG-encoded gradient image of the given dimensions.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = gradient(w, h);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
