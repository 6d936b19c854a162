//! Pure calculation functions for square-resize geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scaled dimensions for fit mode: the longer edge becomes exactly `size`,
/// the shorter edge scales proportionally (rounded to nearest).
///
/// # Examples
/// ```
/// # use square_thumb::imaging::fit_dimensions;
/// // 1920x1080 into a 512 square → 512x288
/// assert_eq!(fit_dimensions((1920, 1080), 512), (512, 288));
///
/// // 300x800 into a 512 square → 192x512
/// assert_eq!(fit_dimensions((300, 800), 512), (192, 512));
/// ```
pub fn fit_dimensions(source: (u32, u32), size: u32) -> (u32, u32) {
    let (w, h) = source;
    if w > h {
        let new_h = (size as f64 * h as f64 / w as f64).round() as u32;
        (size, new_h)
    } else {
        let new_w = (size as f64 * w as f64 / h as f64).round() as u32;
        (new_w, size)
    }
}

/// Top-left offset that centers an inner region on a `size`-square canvas.
///
/// Integer division truncates toward zero, so odd remainders leave one extra
/// pixel of padding on the right/bottom.
pub fn center_offset(inner: (u32, u32), size: u32) -> (u32, u32) {
    let (w, h) = inner;
    ((size - w.min(size)) / 2, (size - h.min(size)) / 2)
}

/// How crop mode handles a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPlan {
    /// Source is smaller than the target on at least one edge: stretch the
    /// whole source directly to the square, aspect ratio not preserved.
    Stretch,
    /// Centered square window to cut before scaling to the target.
    Window { x: u32, y: u32, side: u32 },
}

/// Decide the crop geometry for a source and target size.
///
/// Sources at least `size` on both edges get a centered `min(w, h)` square
/// window; anything smaller falls back to a direct non-uniform stretch.
pub fn plan_crop(source: (u32, u32), size: u32) -> CropPlan {
    let (w, h) = source;
    if w < size || h < size {
        return CropPlan::Stretch;
    }
    let side = w.min(h);
    CropPlan::Window {
        x: (w - side) / 2,
        y: (h - side) / 2,
        side,
    }
}
