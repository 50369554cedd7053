//! Interactive fissure measurement for micrograph images.
//!
//! This crate hosts the headless measurement pipeline behind the GUI in `gui/`:
//! crop a user-selected region out of a source image, apply a to-zero threshold,
//! extract external contours with [imageproc], and report the bounding box of the
//! bottom-most surviving contour as the fissure's length and width.

pub mod contours;
pub mod measure;
pub mod rect;
pub mod roi;

pub use measure::{
    Analysis, DEFAULT_MIN_AREA, DEFAULT_THRESHOLD, MeasureError, MeasureParams, Measurement,
    measure_fissure,
};
pub use roi::{DragExtents, crop_selection};
