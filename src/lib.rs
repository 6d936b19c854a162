//! # Square Thumb
//!
//! A square thumbnail converter. Takes an arbitrary image and produces a
//! fixed-size square rendition, either letterboxed onto a padding canvas
//! (`fit`) or center-cropped (`crop`).
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Every request flows through the same four stages:
//!
//! ```text
//! 1. Validate   request   →  ok / typed error   (policy checks, no image I/O)
//! 2. Load       path      →  bytes              (store read, size already vetted)
//! 3. Transform  bytes     →  square bytes       (decode, resize, composite, encode)
//! 4. Write      bytes     →  output file        (deterministic naming)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Cheap rejection**: bad requests fail on string and metadata checks
//!   before any pixel is decoded.
//! - **Testability**: validation and geometry are pure functions; storage is
//!   behind a trait, so pipeline tests run against an in-memory mock.
//! - **Predictable failures**: every stage maps its faults onto one closed
//!   [`error::ErrorCode`] set, so callers branch on codes, not on strings.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Ordered request checks: presence, path safety, mode, existence, extension, size |
//! | [`imaging`] | Geometry planning plus the decode → transform → encode core |
//! | [`pipeline`] | Drives one request through the stages, emitting progress events |
//! | [`storage`] | `ImageStore` trait, filesystem implementation, output naming |
//! | [`config`] | `config.toml` loading, defaults, and settings validation |
//! | [`types`] | Request and response envelope shared with embedding callers |
//! | [`error`] | `ErrorCode` taxonomy and the `ResizeError` carrier |
//! | [`output`] | CLI output formatting for stage events and verdicts |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! All decoding, resampling (Lanczos3), compositing, and encoding go through
//! the `image` crate. No ImageMagick, no system libraries; the binary is
//! fully self-contained.
//!
//! ## Errors Are Data
//!
//! Expected failures never panic and never lose their category. A
//! [`error::ResizeError`] pairs a closed code with a message, and the CLI
//! maps codes onto exit statuses the same way an HTTP server would map them
//! onto 4xx/5xx. Panics are confined by [`pipeline::run_guarded`] and
//! surface as `INTERNAL_SERVER_ERROR`.
//!
//! ## Deterministic Output Naming
//!
//! Results are named `{stem}_{size}x{size}{_crop}{ext}` inside the
//! configured output directory, so re-running a conversion overwrites its
//! previous result instead of accumulating variants.

pub mod config;
pub mod error;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod storage;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
