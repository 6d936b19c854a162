//! Request validation: cheap policy checks before any image bytes are touched.
//!
//! Checks run in a fixed order and short-circuit on the first failure, so a
//! request failing several checks at once always reports the earliest one:
//!
//! 1. Source presence → `VALIDATION_ERROR`
//! 2. Path-traversal guard (`..` or `~`) → `VALIDATION_ERROR`
//! 3. Mode string (`fit`/`crop`, case-insensitive, absent = fit) → `VALIDATION_ERROR`
//! 4. Existence → `FILE_NOT_FOUND`
//! 5. Extension allow-list → `UNSUPPORTED_FORMAT`
//! 6. Size ceiling → `FILE_TOO_LARGE`
//!
//! Checks 2, 4 and 5 are path-only; for a byte source, presence means a
//! non-empty buffer and the size ceiling checks the buffer length.
//!
//! Side effects are limited to read-only existence/size probes via the store.

use crate::config::Settings;
use crate::error::{Result, ResizeError};
use crate::imaging::ResizeMode;
use crate::storage::ImageStore;
use crate::types::{ResizeRequest, SourceRef};
use std::path::Path;

/// Validate a request against policy. Returns the first failing check.
pub fn validate(
    request: &ResizeRequest,
    source: SourceRef<'_>,
    settings: &Settings,
    store: &impl ImageStore,
) -> Result<()> {
    check_presence(source)?;
    check_traversal(source)?;
    check_mode(request.mode.as_deref())?;
    check_exists(source, store)?;
    check_extension(source, settings)?;
    check_size(source, settings, store)?;
    Ok(())
}

fn check_presence(source: SourceRef<'_>) -> Result<()> {
    let empty = match source {
        SourceRef::Path(p) => p.as_os_str().is_empty(),
        SourceRef::Bytes(b) => b.is_empty(),
    };
    if empty {
        return Err(ResizeError::validation("no source image specified"));
    }
    Ok(())
}

fn check_traversal(source: SourceRef<'_>) -> Result<()> {
    let SourceRef::Path(path) = source else {
        return Ok(());
    };
    let raw = path.to_string_lossy();
    if raw.contains("..") || raw.contains('~') {
        return Err(ResizeError::validation(format!(
            "invalid file path: {raw}"
        )));
    }
    Ok(())
}

fn check_mode(mode: Option<&str>) -> Result<()> {
    ResizeMode::parse(mode).map(|_| ())
}

fn check_exists(source: SourceRef<'_>, store: &impl ImageStore) -> Result<()> {
    let SourceRef::Path(path) = source else {
        return Ok(());
    };
    if !store.exists(path) {
        return Err(ResizeError::not_found(format!(
            "file not found: {}",
            path.display()
        )));
    }
    Ok(())
}

fn check_extension(source: SourceRef<'_>, settings: &Settings) -> Result<()> {
    let SourceRef::Path(path) = source else {
        return Ok(());
    };
    let ext = dotted_extension(path);
    if !settings.is_extension_allowed(&ext) {
        return Err(ResizeError::unsupported_format(format!(
            "unsupported image format: {}",
            if ext.is_empty() { "(none)" } else { &ext }
        )));
    }
    Ok(())
}

fn check_size(
    source: SourceRef<'_>,
    settings: &Settings,
    store: &impl ImageStore,
) -> Result<()> {
    let len = match source {
        SourceRef::Path(path) => store.size(path)?,
        SourceRef::Bytes(bytes) => bytes.len() as u64,
    };
    if len > settings.max_file_size {
        return Err(ResizeError::too_large(format!(
            "file is too large: limit is {}MB",
            settings.max_file_size / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Lowercase extension including the dot, empty when the path has none.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
