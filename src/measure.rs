use image::math::Rect;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::contours::find_contours;
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::drawing::draw_hollow_rect_mut;
use thiserror::Error;

use crate::contours::{retain_measurable_in_place, sort_by_position_owned};

/// Intensity cutoff for the to-zero binarization: pixels at or below this value
/// are zeroed before contour extraction. Calibrated against the micrograph
/// material this tool was written for.
pub const DEFAULT_THRESHOLD: u8 = 4;

/// Contours enclosing an area of at most this many square pixels are treated as
/// noise and ignored. Calibrated alongside [`DEFAULT_THRESHOLD`].
pub const DEFAULT_MIN_AREA: f64 = 100.0;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Tunable knobs of the measurement pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureParams {
    pub threshold: u8,
    pub min_area: f64,
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The selection has zero width or height.
    #[error("selection is empty")]
    EmptySelection,
    /// No contour survived the area filter.
    #[error("no measurable region found in the selection")]
    NoRegionFound,
}

/// Length and width of the measured fissure, in pixels.
///
/// `length` is the height and `width` the width of the axis-aligned bounding
/// box of the selected contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub length: u32,
    pub width: u32,
    pub bounding_box: Rect,
}

/// Output of [`measure_fissure`].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub measurement: Measurement,
    /// Thresholded selection with the bounding box burned in, ready for display.
    pub annotated: RgbImage,
}

/// Measures the fissure within a rectangular selection.
///
/// The selection is converted to single-channel intensity, binarized with a
/// to-zero threshold (pixels at or below `params.threshold` become zero, the
/// rest keep their intensity), and external contours are extracted. Contours
/// enclosing an area of at most `params.min_area` are discarded; of the
/// survivors, the bottom-most (then right-most) by bounding-box position is the
/// measurement target. Its bounding-box height is reported as the fissure's
/// length and its width as the width.
///
/// # Errors
///
/// * [`MeasureError::EmptySelection`] if the selection has zero width or height.
/// * [`MeasureError::NoRegionFound`] if no contour survives the area filter.
pub fn measure_fissure(
    selection: &RgbImage,
    params: &MeasureParams,
) -> Result<Analysis, MeasureError> {
    if selection.width() == 0 || selection.height() == 0 {
        return Err(MeasureError::EmptySelection);
    }

    let gray = image::imageops::grayscale(selection);
    let thresholded = threshold(&gray, params.threshold, ThresholdType::ToZero);

    let mut contours = find_contours::<i32>(&thresholded);
    retain_measurable_in_place(&mut contours, params.min_area);

    let (_, bounding_box) = sort_by_position_owned(contours)
        .pop()
        .ok_or(MeasureError::NoRegionFound)?;

    let mut annotated = DynamicImage::ImageLuma8(thresholded).to_rgb8();
    draw_bounding_box(&mut annotated, &bounding_box);

    Ok(Analysis {
        measurement: Measurement {
            length: bounding_box.height,
            width: bounding_box.width,
            bounding_box,
        },
        annotated,
    })
}

fn draw_bounding_box(canvas: &mut RgbImage, rect: &Rect) {
    let inner = imageproc::rect::Rect::at(rect.x as i32, rect.y as i32)
        .of_size(rect.width, rect.height);
    // Two passes give a 2 px outline; the outer pass clips at the image border.
    let outer = imageproc::rect::Rect::at(rect.x as i32 - 1, rect.y as i32 - 1)
        .of_size(rect.width + 2, rect.height + 2);
    draw_hollow_rect_mut(canvas, inner, BOX_COLOR);
    draw_hollow_rect_mut(canvas, outer, BOX_COLOR);
}
