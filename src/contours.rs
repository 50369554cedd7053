use image::math::Rect;
use imageproc::contours::{BorderType, Contour};
use num::{Num, NumCast};
use num_traits::AsPrimitive;

use crate::rect::bounding_rect;

/// Calculates the area enclosed by a contour using the shoelace formula.
///
/// This matches the value OpenCV's `contourArea` reports for the same polygon:
/// the signed area is accumulated over consecutive point pairs, closing the loop
/// by including the pair made of the last and first point, and the absolute
/// value is halved.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the point coordinates within the contour. It must be a type
///   that can be losslessly converted to `f64`, such as `i32` or `u32`.
///
/// # Returns
///
/// The enclosed area as an `f64`. Contours with fewer than 3 points enclose
/// nothing and have an area of `0.0`.
pub fn contour_area<T>(contour: &Contour<T>) -> f64
where
    T: Num + NumCast + Copy + PartialEq + Eq + AsPrimitive<f64>,
{
    if contour.points.len() < 3 {
        return 0.0;
    }

    let twice_signed: f64 = contour
        .points
        .iter()
        .zip(contour.points.iter().cycle().skip(1))
        .map(|(p1, p2)| p1.x.as_() * p2.y.as_() - p2.x.as_() * p1.y.as_())
        .sum();

    twice_signed.abs() / 2.0
}

/// Filters a vector of contours in-place down to the measurable candidates.
///
/// A contour is kept only when it is a top-level external boundary
/// (`BorderType::Outer` with no parent) and its enclosed area strictly exceeds
/// `min_area`. Hole boundaries, nested contours and speckle noise are removed.
///
/// # Arguments
///
/// * `contours`: A mutable reference to a `Vec<Contour>` to be filtered.
/// * `min_area`: The area below which a contour is treated as noise.
///
/// # Panics
///
/// Panics if `min_area` is not a non-negative finite number.
pub fn retain_measurable_in_place(contours: &mut Vec<Contour<i32>>, min_area: f64) {
    assert!(
        min_area.is_finite() && min_area >= 0.0,
        "min_area must be a non-negative finite number"
    );

    contours.retain(|contour| {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            return false;
        }

        contour_area(contour) > min_area
    });
}

/// Pairs each contour with its bounding rectangle by consuming the input vector,
/// and returns the pairs sorted ascending by `(rect.y, rect.x)`.
///
/// The sort is stable, so contours whose bounding boxes share a top-left corner
/// keep their discovery order. The measurement target is the **last** element of
/// the returned vector: the bottom-most and, among equals, right-most contour.
///
/// Contours without any points have no bounding rectangle and are dropped.
///
/// # Arguments
///
/// * `contours` - A `Vec<Contour<i32>>` which will be consumed by the function. The caller
///   loses ownership of this vector.
///
/// # Returns
///
/// A `Vec<(Contour<i32>, Rect)>` sorted by bounding-box position.
pub fn sort_by_position_owned(contours: Vec<Contour<i32>>) -> Vec<(Contour<i32>, Rect)> {
    let mut positioned: Vec<(Contour<i32>, Rect)> = contours
        .into_iter()
        .filter_map(|contour| bounding_rect(&contour.points).map(|rect| (contour, rect)))
        .collect();

    positioned.sort_by_key(|(_, rect)| (rect.y, rect.x));

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    fn assert_float_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() < 1e-9,
            "Assertion failed: expected {}, got {}",
            b,
            a
        );
    }

    fn square_at(x: i32, y: i32, side: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ]
    }

    fn outer_contour(points: Vec<Point<i32>>) -> Contour<i32> {
        Contour {
            points,
            border_type: BorderType::Outer,
            parent: None,
        }
    }

    #[test]
    fn test_contour_area() {
        // A 10x10 square has a polygon area of 100.
        assert_float_eq(contour_area(&outer_contour(square_at(0, 0, 10))), 100.0);

        // A 3-4-5 right triangle has an area of 6, regardless of winding.
        let triangle = outer_contour(vec![Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)]);
        let reversed = outer_contour(vec![Point::new(0, 4), Point::new(3, 0), Point::new(0, 0)]);
        assert_float_eq(contour_area(&triangle), 6.0);
        assert_float_eq(contour_area(&reversed), 6.0);

        // Degenerate contours enclose nothing.
        assert_float_eq(contour_area(&outer_contour(Vec::new())), 0.0);
        assert_float_eq(contour_area(&outer_contour(vec![Point::new(5, 5)])), 0.0);
        assert_float_eq(
            contour_area(&outer_contour(vec![Point::new(0, 0), Point::new(10, 0)])),
            0.0,
        );
    }

    #[test]
    fn test_retain_measurable() {
        let big = outer_contour(square_at(10, 10, 30));
        let small = outer_contour(square_at(60, 10, 4));
        let hole = Contour {
            points: square_at(15, 15, 20),
            border_type: BorderType::Hole,
            parent: Some(0),
        };
        let nested = Contour {
            points: square_at(18, 18, 14),
            border_type: BorderType::Outer,
            parent: Some(2),
        };

        let mut contours = vec![big.clone(), small, hole, nested];
        retain_measurable_in_place(&mut contours, 100.0);

        assert_eq!(contours.len(), 1, "only the big outer contour survives");
        assert_eq!(contours[0].points, big.points);
    }

    #[test]
    fn test_retain_measurable_threshold_is_strict() {
        // A 10x10 square encloses exactly 100; the filter requires strictly more.
        let boundary = outer_contour(square_at(0, 0, 10));
        let above = outer_contour(square_at(20, 0, 11));

        let mut contours = vec![boundary, above.clone()];
        retain_measurable_in_place(&mut contours, 100.0);

        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, above.points);
    }

    #[test]
    fn test_sort_by_position_orders_by_y_then_x() {
        let top_left = outer_contour(square_at(5, 5, 10));
        let top_right = outer_contour(square_at(40, 5, 10));
        let bottom = outer_contour(square_at(2, 30, 10));

        let sorted =
            sort_by_position_owned(vec![bottom.clone(), top_right.clone(), top_left.clone()]);

        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0].0.points, top_left.points);
        assert_eq!(sorted[1].0.points, top_right.points);
        assert_eq!(sorted[2].0.points, bottom.points);

        // The last element is the measurement target.
        let (_, rect) = &sorted[2];
        assert_eq!((rect.x, rect.y), (2, 30));
    }

    #[test]
    fn test_sort_by_position_is_stable_for_exact_ties() {
        let first = outer_contour(square_at(5, 5, 10));
        let second = outer_contour(square_at(5, 5, 20));

        let sorted = sort_by_position_owned(vec![first.clone(), second.clone()]);

        assert_eq!(sorted[0].0.points, first.points);
        assert_eq!(sorted[1].0.points, second.points);
    }

    #[test]
    fn test_sort_by_position_drops_empty_contours() {
        let empty = outer_contour(Vec::new());
        let solid = outer_contour(square_at(0, 0, 10));

        let sorted = sort_by_position_owned(vec![empty, solid.clone()]);

        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].0.points, solid.points);
    }
}
