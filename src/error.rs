//! Error taxonomy shared by every pipeline stage.
//!
//! All expected failures flow through [`ResizeError`], which pairs a closed
//! [`ErrorCode`] with a human-readable message. Components never panic for
//! expected failure conditions; the caller-facing layer translates the code
//! into its transport equivalent (exit status for the CLI, HTTP status for an
//! embedding server).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Closed set of failure codes.
///
/// Serializes to `SCREAMING_SNAKE_CASE` strings (`VALIDATION_ERROR`, …) in
/// the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request: empty/unsafe path, invalid mode string.
    ValidationError,
    /// Source resource does not exist.
    FileNotFound,
    /// Extension not in the configured allow-list.
    UnsupportedFormat,
    /// Source byte size exceeds the configured ceiling.
    FileTooLarge,
    /// I/O failure reading the source.
    FileReadError,
    /// I/O failure writing the destination.
    FileWriteError,
    /// Bytes are not a decodable image of a supported codec.
    ImageLoadError,
    /// Failure during the geometric transform or encode.
    ImageProcessingError,
    /// Any uncategorized failure; message is generic unless verbose.
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::FileReadError => "FILE_READ_ERROR",
            ErrorCode::FileWriteError => "FILE_WRITE_ERROR",
            ErrorCode::ImageLoadError => "IMAGE_LOAD_ERROR",
            ErrorCode::ImageProcessingError => "IMAGE_PROCESSING_ERROR",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Whether the failure is the caller's fault (bad request) rather than
    /// an environment or processing fault. Drives the CLI exit-code mapping
    /// the same way an HTTP layer would pick 4xx vs 5xx.
    pub fn is_request_error(self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationError
                | ErrorCode::UnsupportedFormat
                | ErrorCode::FileTooLarge
                | ErrorCode::ImageLoadError
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expected failure: a code plus a message.
///
/// A `ResizeError` always carries a code; successes carry no error fields.
/// This is the sole error-propagation vehicle between the validator, the
/// resizer, the store, and their callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ResizeError {
    pub code: ErrorCode,
    pub message: String,
}

impl ResizeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileNotFound, message)
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedFormat, message)
    }

    pub fn too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileTooLarge, message)
    }

    pub fn read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileReadError, message)
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileWriteError, message)
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ImageLoadError, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ImageProcessingError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }
}
