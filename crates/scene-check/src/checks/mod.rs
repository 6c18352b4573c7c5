//! The four validators and their shared toggles.

pub mod overlap;
pub mod pivot;
pub mod scale;
pub mod uv_winding;

pub use overlap::verify_overlap;
pub use pivot::verify_pivot;
pub use scale::verify_scale;
pub use uv_winding::verify_uv;

/// Toggles controlling what the checks report and auto-correct.
///
/// All off by default: checks report violations without mutating and the
/// report accumulates across runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Clear the report at the start of each check instead of separating.
    pub auto_clear: bool,

    /// Reset non-unit scales to (1,1,1).
    pub replace_scale: bool,

    /// Flip the UVs of wrong-winding faces.
    pub flip_faces: bool,

    /// Reset off-origin pivots to (0,0,0).
    pub reset_pivot: bool,

    /// When resetting pivots, compensate by moving the object.
    pub move_with_pivot: bool,

    /// Weld overlapping vertices after the scan.
    pub remove_overlapping: bool,

    /// Skip the overlap scan (the weld still runs if requested).
    pub skip_overlap_check: bool,
}

pub(crate) const NOTHING_SELECTED: &str = "Nothing selected";
