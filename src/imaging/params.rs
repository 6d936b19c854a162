//! Parameter types for the square-resize transform.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the request-handling [`pipeline`](crate::pipeline)
//! (which decides what to convert) and [`resize`](super::resize) (which does
//! the actual pixel work).
//!
//! ## Types
//!
//! - [`ResizeMode`] — Fit (pad) or Crop (center-cut then stretch).
//! - [`OutputFormat`] — Closed encode-format set; unknown extensions fall back to PNG.
//! - [`Quality`] — JPEG quality (1–100, default 90). Clamped on construction.
//! - [`PngCompression`] — PNG compression level (0–9, default 6). Clamped on construction.
//! - [`TransformOptions`] — Padding color + encoder tunables, derived from [`Settings`](crate::config::Settings).

use crate::config::Settings;
use crate::error::{Result, ResizeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometric strategy for producing the square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Aspect-preserving scale, remainder padded with a solid color.
    #[default]
    Fit,
    /// Centered square crop, then stretch to the target.
    Crop,
}

impl ResizeMode {
    /// Parse an optional caller-supplied mode string, case-insensitively.
    ///
    /// An absent mode defaults to fit. Anything other than `fit`/`crop` is a
    /// validation failure.
    pub fn parse(mode: Option<&str>) -> Result<Self> {
        match mode {
            None => Ok(ResizeMode::Fit),
            Some(s) if s.eq_ignore_ascii_case("fit") => Ok(ResizeMode::Fit),
            Some(s) if s.eq_ignore_ascii_case("crop") => Ok(ResizeMode::Crop),
            Some(s) => Err(ResizeError::validation(format!(
                "invalid resize mode: {s} (expected 'fit' or 'crop')"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Fit => "fit",
            ResizeMode::Crop => "crop",
        }
    }
}

impl std::fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl OutputFormat {
    /// Map a file extension (without dot, any case) to a format.
    /// Unknown extensions fall back to PNG.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => OutputFormat::Jpeg,
            "png" => OutputFormat::Png,
            "gif" => OutputFormat::Gif,
            "bmp" => OutputFormat::Bmp,
            _ => OutputFormat::Png,
        }
    }

    /// Format implied by a path's extension. No extension falls back to PNG.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(OutputFormat::Png)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
            OutputFormat::Bmp => "bmp",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JPEG quality setting (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// PNG compression level (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngCompression(u8);

impl PngCompression {
    pub fn new(value: u8) -> Self {
        Self(value.min(9))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for PngCompression {
    fn default() -> Self {
        Self(6)
    }
}

/// Everything the transform needs beyond the image bytes themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// RGBA fill for unused canvas area in fit mode.
    pub padding_color: [u8; 4],
    pub jpeg_quality: Quality,
    pub png_compression: PngCompression,
}

impl TransformOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            padding_color: settings.padding_color.rgba(),
            jpeg_quality: Quality::new(settings.encoding.jpeg_quality),
            png_compression: PngCompression::new(settings.encoding.png_compression_level),
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            padding_color: [0, 0, 0, 255],
            jpeg_quality: Quality::default(),
            png_compression: PngCompression::default(),
        }
    }
}
