//! The resize pipeline: validate, load, transform, write.
//!
//! [`run`] drives one request end to end against an [`ImageStore`] and a
//! [`Settings`] snapshot. Each stage emits a [`StageEvent`] through an
//! optional channel so callers can report progress without the pipeline
//! knowing anything about presentation.
//!
//! [`run_guarded`] wraps [`run`] in a panic boundary so a bug in decoding or
//! transforming a single image degrades to an `INTERNAL_SERVER_ERROR`
//! response instead of taking the process down.

use crate::config::Settings;
use crate::error::{Result, ResizeError};
use crate::imaging::{OutputFormat, ResizeMode, TransformOptions, resize_to_square};
use crate::storage::{ImageStore, output_path};
use crate::types::{ResizeRequest, ResizeResponse, SourceRef};
use crate::validate::validate;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Progress notifications emitted as a request moves through the stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// Request accepted, before any checks run. Carries the raw mode string
    /// since parsing is itself one of the checks.
    Received { path: PathBuf, mode: Option<String> },
    /// All validation checks passed.
    Validated,
    /// Source bytes read from the store.
    Loaded { bytes: usize },
    /// Square produced and encoded.
    Transformed { mode: ResizeMode, size: u32, bytes: usize },
    /// Result written out.
    Written { path: PathBuf },
}

fn emit(events: Option<&Sender<StageEvent>>, event: StageEvent) {
    // A dropped receiver just means nobody is listening
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Run one resize request end to end.
pub fn run(
    store: &impl ImageStore,
    settings: &Settings,
    request: &ResizeRequest,
    events: Option<&Sender<StageEvent>>,
) -> Result<ResizeResponse> {
    emit(
        events,
        StageEvent::Received {
            path: request.file_path.clone(),
            mode: request.mode.clone(),
        },
    );

    validate(request, SourceRef::Path(&request.file_path), settings, store)?;
    emit(events, StageEvent::Validated);

    // Cannot fail past this point, validation already checked the string
    let mode = ResizeMode::parse(request.mode.as_deref())?;

    let size = request.target_size.unwrap_or(settings.target_size.width);
    let format = request
        .output_format
        .unwrap_or_else(|| OutputFormat::from_path(&request.file_path));

    let source = store.read_bytes(&request.file_path)?;
    emit(events, StageEvent::Loaded { bytes: source.len() });

    let opts = TransformOptions::from_settings(settings);
    let result = resize_to_square(&source, size, mode, format, &opts)?;
    emit(
        events,
        StageEvent::Transformed {
            mode,
            size,
            bytes: result.len(),
        },
    );

    let out = output_path(
        &request.file_path,
        Path::new(&settings.output_directory),
        (size, size),
        mode,
    );
    store.write_bytes(&out, &result)?;
    emit(events, StageEvent::Written { path: out.clone() });

    Ok(ResizeResponse::ok(&out, mode, size))
}

/// Resize an in-memory image and return the encoded square, no disk involved.
pub fn resize_bytes(
    settings: &Settings,
    bytes: &[u8],
    mode: Option<&str>,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let request = ResizeRequest::new("");
    // Byte sources skip the path-only checks; the store is never consulted
    validate(
        &request,
        SourceRef::Bytes(bytes),
        settings,
        &crate::storage::FsStore::new(),
    )?;
    let mode = ResizeMode::parse(mode)?;
    let opts = TransformOptions::from_settings(settings);
    resize_to_square(
        bytes,
        settings.target_size.width,
        mode,
        format,
        &opts,
    )
}

/// Run a request behind a panic boundary.
///
/// Panics become an `INTERNAL_SERVER_ERROR` response. The panic payload is
/// only surfaced when `verbose` is set; otherwise callers get a generic
/// message.
pub fn run_guarded(
    store: &impl ImageStore,
    settings: &Settings,
    request: &ResizeRequest,
    events: Option<&Sender<StageEvent>>,
    verbose: bool,
) -> ResizeResponse {
    let outcome = catch_unwind(AssertUnwindSafe(|| run(store, settings, request, events)));
    match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => ResizeResponse::failure(&err),
        Err(payload) => {
            let err = if verbose {
                ResizeError::internal(format!(
                    "unexpected failure: {}",
                    panic_message(&payload)
                ))
            } else {
                ResizeError::internal("an unexpected error occurred")
            };
            ResizeResponse::failure(&err)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::storage::tests::MockStore;
    use crate::test_helpers::{jpeg_bytes, png_bytes};
    use std::sync::mpsc;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn run_fit_writes_named_output() {
        let store = MockStore::with_file("photos/cat.jpg", jpeg_bytes(400, 300));
        let request = ResizeRequest::new("photos/cat.jpg");

        let response = run(&store, &settings(), &request, None).unwrap();

        assert!(response.success);
        assert_eq!(response.output_path.as_deref(), Some("resized/cat_512x512.jpg"));
        assert_eq!(response.resize_mode.as_deref(), Some("fit"));
        assert_eq!(response.message, "image converted to 512x512");
        assert!(store.written(Path::new("resized/cat_512x512.jpg")).is_some());
    }

    #[test]
    fn run_crop_appends_marker() {
        let store = MockStore::with_file("photos/cat.png", png_bytes(800, 600));
        let request = ResizeRequest::new("photos/cat.png").with_mode("crop");

        let response = run(&store, &settings(), &request, None).unwrap();

        assert_eq!(
            response.output_path.as_deref(),
            Some("resized/cat_512x512_crop.png")
        );
        assert_eq!(response.resize_mode.as_deref(), Some("crop"));
    }

    #[test]
    fn run_honors_request_target_size() {
        let store = MockStore::with_file("photos/cat.png", png_bytes(300, 300));
        let mut request = ResizeRequest::new("photos/cat.png");
        request.target_size = Some(64);

        let response = run(&store, &settings(), &request, None).unwrap();

        assert_eq!(response.output_path.as_deref(), Some("resized/cat_64x64.png"));
        let written = store.written(Path::new("resized/cat_64x64.png")).unwrap();
        let img = image::load_from_memory(&written).unwrap();
        assert_eq!((img.width(), img.height()), (64, 64));
    }

    #[test]
    fn run_missing_file_is_not_found() {
        let store = MockStore::new();
        let request = ResizeRequest::new("photos/cat.jpg");

        let err = run(&store, &settings(), &request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn run_invalid_mode_fails_before_read() {
        let store = MockStore::with_file("photos/cat.jpg", jpeg_bytes(100, 100));
        let request = ResizeRequest::new("photos/cat.jpg").with_mode("tile");

        let err = run(&store, &settings(), &request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn run_corrupt_source_is_load_error() {
        let store = MockStore::with_file("photos/cat.jpg", b"not an image".to_vec());
        let request = ResizeRequest::new("photos/cat.jpg");

        let err = run(&store, &settings(), &request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageLoadError);
    }

    #[test]
    fn run_read_failure_is_read_error() {
        let mut store = MockStore::with_file("photos/cat.jpg", jpeg_bytes(100, 100));
        store.fail_reads = true;
        let request = ResizeRequest::new("photos/cat.jpg");

        let err = run(&store, &settings(), &request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileReadError);
    }

    #[test]
    fn run_write_failure_is_write_error() {
        let mut store = MockStore::with_file("photos/cat.jpg", jpeg_bytes(100, 100));
        store.fail_writes = true;
        let request = ResizeRequest::new("photos/cat.jpg");

        let err = run(&store, &settings(), &request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileWriteError);
    }

    #[test]
    fn run_emits_stage_events_in_order() {
        let store = MockStore::with_file("photos/cat.jpg", jpeg_bytes(200, 100));
        let request = ResizeRequest::new("photos/cat.jpg");
        let (tx, rx) = mpsc::channel();

        run(&store, &settings(), &request, Some(&tx)).unwrap();
        drop(tx);

        let events: Vec<StageEvent> = rx.iter().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], StageEvent::Received { .. }));
        assert_eq!(events[1], StageEvent::Validated);
        assert!(matches!(events[2], StageEvent::Loaded { .. }));
        assert!(matches!(
            events[3],
            StageEvent::Transformed { mode: ResizeMode::Fit, size: 512, .. }
        ));
        assert!(matches!(events[4], StageEvent::Written { .. }));
    }

    #[test]
    fn run_failure_stops_event_stream() {
        let store = MockStore::new();
        let request = ResizeRequest::new("photos/cat.jpg");
        let (tx, rx) = mpsc::channel();

        run(&store, &settings(), &request, Some(&tx)).unwrap_err();
        drop(tx);

        let events: Vec<StageEvent> = rx.iter().collect();
        // Received only; validation failed before any later stage
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StageEvent::Received { .. }));
    }

    #[test]
    fn resize_bytes_returns_square() {
        let out = resize_bytes(
            &settings(),
            &png_bytes(640, 480),
            Some("fit"),
            OutputFormat::Png,
        )
        .unwrap();
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!((img.width(), img.height()), (512, 512));
    }

    #[test]
    fn resize_bytes_rejects_empty_input() {
        let err = resize_bytes(&settings(), &[], None, OutputFormat::Png).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn guarded_maps_error_to_failure_response() {
        let store = MockStore::new();
        let request = ResizeRequest::new("photos/cat.jpg");

        let response = run_guarded(&store, &settings(), &request, None, false);

        assert!(!response.success);
        assert_eq!(response.error_code, Some(ErrorCode::FileNotFound));
    }

    #[test]
    fn guarded_turns_panic_into_internal_error() {
        struct PanickyStore;
        impl ImageStore for PanickyStore {
            fn read_bytes(&self, _: &Path) -> crate::error::Result<Vec<u8>> {
                panic!("boom")
            }
            fn write_bytes(&self, _: &Path, _: &[u8]) -> crate::error::Result<()> {
                Ok(())
            }
            fn exists(&self, _: &Path) -> bool {
                true
            }
            fn size(&self, _: &Path) -> crate::error::Result<u64> {
                Ok(1)
            }
        }

        let request = ResizeRequest::new("photos/cat.jpg");
        let response = run_guarded(&PanickyStore, &settings(), &request, None, false);

        assert!(!response.success);
        assert_eq!(response.error_code, Some(ErrorCode::InternalServerError));
        assert_eq!(response.message, "an unexpected error occurred");

        let verbose = run_guarded(&PanickyStore, &settings(), &request, None, true);
        assert!(verbose.message.contains("boom"));
    }
}
