//! Image storage: reading sources, writing results, output naming.
//!
//! The [`ImageStore`] trait is the seam between the pipeline and the
//! filesystem, so pipeline logic can be tested against an in-memory mock
//! without touching disk. The production implementation is [`FsStore`].
//!
//! ## Output naming
//!
//! `{stem}_{W}x{H}{_crop if crop mode}{original extension}` inside the
//! configured output directory, e.g. `cat.jpg` → `resized/cat_512x512.jpg`
//! for fit and `resized/cat_512x512_crop.jpg` for crop.

use crate::error::{Result, ResizeError};
use crate::imaging::ResizeMode;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage operations the pipeline needs.
pub trait ImageStore: Sync {
    /// Read the full contents of a source image.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write result bytes, creating missing parent directories.
    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Whether the source exists.
    fn exists(&self, path: &Path) -> bool;

    /// Byte length of the source, for the size-ceiling check.
    fn size(&self, path: &Path) -> Result<u64>;
}

/// Filesystem-backed store.
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore for FsStore {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(ResizeError::not_found(format!(
                "file not found: {}",
                path.display()
            )));
        }
        std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ResizeError::read(format!(
                "no permission to read {}",
                path.display()
            )),
            _ => ResizeError::read(format!("failed to read {}: {e}", path.display())),
        })
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ResizeError::write(format!(
                    "failed to create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        std::fs::write(path, data).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ResizeError::write(format!(
                "no permission to write {}",
                path.display()
            )),
            _ => ResizeError::write(format!("failed to write {}: {e}", path.display())),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn size(&self, path: &Path) -> Result<u64> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| ResizeError::read(format!("failed to stat {}: {e}", path.display())))
    }
}

/// Build the output path for a converted image.
///
/// Keeps the input's stem and extension, appending the target dimensions and
/// a `_crop` marker for crop mode.
pub fn output_path(
    input: &Path,
    output_dir: &Path,
    size: (u32, u32),
    mode: ResizeMode,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let suffix = match mode {
        ResizeMode::Fit => String::new(),
        ResizeMode::Crop => "_crop".to_string(),
    };
    let (w, h) = size;
    output_dir.join(format!("{stem}_{w}x{h}{suffix}{ext}"))
}
