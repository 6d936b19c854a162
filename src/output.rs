//! CLI output formatting for pipeline progress and results.
//!
//! # Output Format
//!
//! Stage events render as a short progress log, one entity per line with
//! indented context:
//!
//! ```text
//! photos/cat.jpg (fit)
//!     validated
//!     loaded 182 KB
//!     transformed to 512x512 (24 KB, fit mode)
//!     written resized/cat_512x512.jpg
//! ```
//!
//! The final response renders as a one-line verdict:
//!
//! ```text
//! ok: resized/cat_512x512.jpg
//! error [FILE_NOT_FOUND]: file not found: photos/cat.jpg
//! ```
//!
//! # Architecture
//!
//! Each shape has a `format_*` function (returns lines) for testability and a
//! `print_*` wrapper that writes to stdout or stderr. Format functions are
//! pure, no I/O and no side effects.

use crate::pipeline::StageEvent;
use crate::types::ResizeResponse;

/// Render a byte count as a short human-readable figure.
fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a single stage event as display lines.
///
/// The `Received` event is the unindented header; every later stage is an
/// indented context line under it.
pub fn format_stage_event(event: &StageEvent) -> Vec<String> {
    match event {
        StageEvent::Received { path, mode } => {
            let mode = mode.as_deref().unwrap_or("fit");
            vec![format!("{} ({})", path.display(), mode)]
        }
        StageEvent::Validated => vec!["    validated".to_string()],
        StageEvent::Loaded { bytes } => {
            vec![format!("    loaded {}", format_bytes(*bytes))]
        }
        StageEvent::Transformed { mode, size, bytes } => vec![format!(
            "    transformed to {size}x{size} ({}, {} mode)",
            format_bytes(*bytes),
            mode.as_str()
        )],
        StageEvent::Written { path } => {
            vec![format!("    written {}", path.display())]
        }
    }
}

/// Format the final response as a one-line verdict.
pub fn format_response(response: &ResizeResponse) -> String {
    if response.success {
        format!(
            "ok: {}",
            response.output_path.as_deref().unwrap_or("(no output)")
        )
    } else {
        let code = response
            .error_code
            .map(|c| c.as_str())
            .unwrap_or("UNKNOWN");
        format!("error [{}]: {}", code, response.message)
    }
}

/// Print a stage event to stdout.
pub fn print_stage_event(event: &StageEvent) {
    for line in format_stage_event(event) {
        println!("{}", line);
    }
}

/// Print the final verdict: stdout on success, stderr on failure.
pub fn print_response(response: &ResizeResponse) {
    let line = format_response(response);
    if response.success {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }
}
