//! Shared request/response types.
//!
//! [`ResizeRequest`] is what a caller hands the pipeline; [`ResizeResponse`]
//! is the JSON envelope handed back (camelCase on the wire). Both are
//! constructed once per call and never mutated.

use crate::error::{ErrorCode, ResizeError};
use crate::imaging::{OutputFormat, ResizeMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single square-resize request.
///
/// `mode` is carried as the raw caller-supplied string so the validator owns
/// mode checking; `target_size` and `output_format` default to the configured
/// size and the source extension when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// Path to the source image.
    pub file_path: PathBuf,
    /// Optional mode string (`fit`/`crop`, case-insensitive). Absent = fit.
    pub mode: Option<String>,
    /// Output square edge length; absent = configured target size.
    pub target_size: Option<u32>,
    /// Encode format; absent = inferred from the source extension.
    pub output_format: Option<OutputFormat>,
}

impl ResizeRequest {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            mode: None,
            target_size: None,
            output_format: None,
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// What the validator looks at: a path on disk or an in-memory buffer.
///
/// Path-only checks (traversal guard, existence, extension) are skipped for
/// byte sources; the presence and size-ceiling checks apply to both.
#[derive(Debug, Clone, Copy)]
pub enum SourceRef<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

/// Caller-facing outcome envelope, serialized as camelCase JSON.
///
/// Exactly one of the two shapes holds: a success carries the output path and
/// the mode used; a failure carries a non-empty error code and message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResizeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    pub message: String,
}

impl ResizeResponse {
    pub fn ok(output_path: &Path, mode: ResizeMode, size: u32) -> Self {
        Self {
            success: true,
            output_path: Some(output_path.to_string_lossy().into_owned()),
            resize_mode: Some(mode.as_str().to_string()),
            error_code: None,
            message: format!("image converted to {size}x{size}"),
        }
    }

    pub fn failure(err: &ResizeError) -> Self {
        Self {
            success: false,
            output_path: None,
            resize_mode: None,
            error_code: Some(err.code),
            message: err.message.clone(),
        }
    }
}
