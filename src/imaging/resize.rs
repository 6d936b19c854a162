//! The square-resize transform: decode → geometry → composite → encode.
//!
//! Operates purely on in-memory bytes; reading the source and writing the
//! result belong to [`storage`](crate::storage). Each call is a single-shot
//! pure transform of its inputs, so parallel invocation across requests is
//! safe.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP) | `image::load_from_memory` |
//! | Scale | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Pad composite (fit) | `image::imageops::overlay` onto a filled canvas |
//! | Center crop | `image::DynamicImage::crop_imm` |
//! | Encode → JPEG / PNG | `JpegEncoder` / `PngEncoder` via `write_with_encoder` |
//! | Encode → GIF / BMP | `DynamicImage::write_to` (encoder defaults) |

use super::calculations::{CropPlan, center_offset, fit_dimensions, plan_crop};
use super::params::{OutputFormat, PngCompression, ResizeMode, TransformOptions};
use crate::error::{Result, ResizeError};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Transform image bytes into a `size × size` square in the given format.
///
/// Fit mode scales the source so its longer edge is exactly `size` and
/// composites it centered on a padding-colored canvas. Crop mode cuts a
/// centered `min(w, h)` square and stretches it to the target; sources
/// smaller than the target on either edge are stretched whole, aspect ratio
/// not preserved.
pub fn resize_to_square(
    bytes: &[u8],
    size: u32,
    mode: ResizeMode,
    format: OutputFormat,
    opts: &TransformOptions,
) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(ResizeError::processing("target size must be positive"));
    }

    let img = image::load_from_memory(bytes).map_err(|e| {
        ResizeError::load(format!(
            "failed to decode image data, the file may be corrupt: {e}"
        ))
    })?;

    let square = match mode {
        ResizeMode::Fit => fit_to_square(&img, size, opts.padding_color),
        ResizeMode::Crop => crop_to_square(&img, size),
    };

    encode(&square, format, opts)
}

/// Aspect-preserving scale centered on a padding-filled square canvas.
fn fit_to_square(img: &DynamicImage, size: u32, padding: [u8; 4]) -> DynamicImage {
    let (new_w, new_h) = fit_dimensions((img.width(), img.height()), size);
    let scaled = img.resize_exact(new_w, new_h, FilterType::Lanczos3).into_rgba8();

    let mut canvas = RgbaImage::from_pixel(size, size, Rgba(padding));
    let (x, y) = center_offset((new_w, new_h), size);
    image::imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
    DynamicImage::ImageRgba8(canvas)
}

/// Centered square crop stretched to the target; small sources stretch whole.
fn crop_to_square(img: &DynamicImage, size: u32) -> DynamicImage {
    match plan_crop((img.width(), img.height()), size) {
        CropPlan::Stretch => img.resize_exact(size, size, FilterType::Lanczos3),
        CropPlan::Window { x, y, side } => img
            .crop_imm(x, y, side, side)
            .resize_exact(size, size, FilterType::Lanczos3),
    }
}

/// Encode into the requested format with the configured tunables.
///
/// This is the single encoder dispatch point; adding a format means adding
/// one arm here without touching any call site.
fn encode(img: &DynamicImage, format: OutputFormat, opts: &TransformOptions) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    let written = match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; flatten before encoding
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buf, opts.jpeg_quality.value());
            rgb.write_with_encoder(encoder)
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buf,
                compression_for(opts.png_compression),
                PngFilterType::Adaptive,
            );
            img.write_with_encoder(encoder)
        }
        OutputFormat::Gif => img.write_to(&mut buf, ImageFormat::Gif),
        OutputFormat::Bmp => img.write_to(&mut buf, ImageFormat::Bmp),
    };

    written.map_err(|e| ResizeError::processing(format!("{format} encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Map the configured 0-9 level onto the encoder's compression tiers.
fn compression_for(level: PngCompression) -> CompressionType {
    match level.level() {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}
