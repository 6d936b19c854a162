//! Image processing — pure Rust, zero external dependencies.
//!
//! The module is split into:
//! - **Calculations**: Pure functions for the square geometry (unit testable)
//! - **Parameters**: Data structures describing a transform
//! - **Resize**: The decode → composite → encode transform on bytes

mod calculations;
mod params;
mod resize;

pub use calculations::{CropPlan, center_offset, fit_dimensions, plan_crop};
pub use params::{OutputFormat, PngCompression, Quality, ResizeMode, TransformOptions};
pub use resize::resize_to_square;
