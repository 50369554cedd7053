use image::math::Rect;
use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Calculates the axis-aligned bounding rectangle of a set of contour points.
///
/// This function is designed to work with the `points` of an
/// `imageproc::contours::Contour`. It iterates through the points to find the
/// minimum and maximum x and y coordinates, then constructs an `image::math::Rect`
/// that encloses all of them. The extents are inclusive of the end pixels, so a
/// single point yields a 1×1 rectangle. This matches how OpenCV's `boundingRect`
/// reports the box of a discrete pixel contour.
///
/// This version is generic over numeric types that implement `PartialOrd`, making it
/// suitable for both integer and floating-point coordinates.
///
/// # Arguments
///
/// * `points` - A slice of `Point<T>`. `T` must be a numeric type that supports
///   partial ordering and arithmetic operations.
///
/// # Returns
///
/// `Some(Rect)` enclosing all input points, or `None` if the slice is empty.
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use fissure_gauge::rect::bounding_rect;
///
/// let diamond = [
///     Point { x: 50, y: 10 },
///     Point { x: 90, y: 50 },
///     Point { x: 50, y: 90 },
///     Point { x: 10, y: 50 },
/// ];
///
/// let bounding_box = bounding_rect(&diamond).unwrap();
///
/// assert_eq!(bounding_box.x, 10);
/// assert_eq!(bounding_box.y, 10);
/// assert_eq!(bounding_box.width, 81);
/// assert_eq!(bounding_box.height, 81);
/// ```
pub fn bounding_rect<T>(points: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    // Manual comparison is used here because `T` only has a `PartialOrd`.
    // This is required to support floating-point types, which do not implement `Ord`.
    for p in &points[1..] {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    // Inclusive extents: a contour occupying a single pixel spans a 1x1 box.
    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x) + 1;
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y) + 1;

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}
