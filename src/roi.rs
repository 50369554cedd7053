use image::RgbImage;
use image::math::Rect;

/// Raw rectangle-selection extents in image pixel space, as reported by the
/// selection widget. The corners may arrive in any drag direction and may lie
/// outside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragExtents {
    pub x1: f32,
    pub x2: f32,
    pub y1: f32,
    pub y2: f32,
}

impl DragExtents {
    /// Converts the drag extents into an integer pixel rectangle clamped to the
    /// image bounds.
    ///
    /// Coordinates are truncated towards zero and the width and height are the
    /// exclusive differences of the truncated extents, so a drag from x 10.0 to
    /// x 30.0 selects exactly 20 columns. Selections that collapse to zero area
    /// after truncation and clamping yield `None`.
    pub fn to_pixel_rect(self, image_width: u32, image_height: u32) -> Option<Rect> {
        if image_width == 0 || image_height == 0 {
            return None;
        }

        let x_lo = (self.x1.min(self.x2).max(0.0) as u32).min(image_width);
        let x_hi = (self.x1.max(self.x2).max(0.0) as u32).min(image_width);
        let y_lo = (self.y1.min(self.y2).max(0.0) as u32).min(image_height);
        let y_hi = (self.y1.max(self.y2).max(0.0) as u32).min(image_height);

        let width = x_hi - x_lo;
        let height = y_hi - y_lo;
        if width == 0 || height == 0 {
            return None;
        }

        Some(Rect {
            x: x_lo,
            y: y_lo,
            width,
            height,
        })
    }
}

/// Copies the rectangular region described by `rect` out of the source image.
///
/// The caller is expected to produce `rect` with [`DragExtents::to_pixel_rect`],
/// which guarantees it lies within the image bounds.
pub fn crop_selection(image: &RgbImage, rect: &Rect) -> RgbImage {
    image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_extents_truncate_to_exact_pixel_rect() {
        let extents = DragExtents {
            x1: 10.9,
            x2: 30.2,
            y1: 5.5,
            y2: 25.0,
        };

        let rect = extents.to_pixel_rect(100, 100).unwrap();
        assert_eq!((rect.x, rect.y), (10, 5));
        assert_eq!((rect.width, rect.height), (20, 20));
    }

    #[test]
    fn test_reversed_drag_gives_same_rect() {
        let forward = DragExtents {
            x1: 10.0,
            x2: 30.0,
            y1: 5.0,
            y2: 25.0,
        };
        let backward = DragExtents {
            x1: 30.0,
            x2: 10.0,
            y1: 25.0,
            y2: 5.0,
        };

        assert_eq!(
            forward.to_pixel_rect(100, 100),
            backward.to_pixel_rect(100, 100)
        );
    }

    #[test]
    fn test_extents_clamp_to_image_bounds() {
        let extents = DragExtents {
            x1: -5.0,
            x2: 1000.0,
            y1: -3.0,
            y2: 1e9,
        };

        let rect = extents.to_pixel_rect(100, 80).unwrap();
        assert_eq!((rect.x, rect.y), (0, 0));
        assert_eq!((rect.width, rect.height), (100, 80));
    }

    #[test]
    fn test_selection_at_far_edge_is_exact() {
        // Off-by-one check at the extents: the last 10 columns and rows.
        let extents = DragExtents {
            x1: 90.0,
            x2: 100.0,
            y1: 70.0,
            y2: 80.0,
        };

        let rect = extents.to_pixel_rect(100, 80).unwrap();
        assert_eq!((rect.x, rect.y), (90, 70));
        assert_eq!((rect.width, rect.height), (10, 10));
    }

    #[test]
    fn test_degenerate_selection_is_rejected() {
        let collapsed = DragExtents {
            x1: 5.0,
            x2: 5.4,
            y1: 10.0,
            y2: 40.0,
        };
        assert_eq!(collapsed.to_pixel_rect(100, 100), None);

        let outside = DragExtents {
            x1: 200.0,
            x2: 300.0,
            y1: 10.0,
            y2: 40.0,
        };
        assert_eq!(outside.to_pixel_rect(100, 100), None);

        let no_image = DragExtents {
            x1: 0.0,
            x2: 10.0,
            y1: 0.0,
            y2: 10.0,
        };
        assert_eq!(no_image.to_pixel_rect(0, 0), None);
    }

    #[test]
    fn test_crop_selection_copies_the_right_pixels() {
        let mut source = RgbImage::new(40, 30);
        for (x, y, pixel) in source.enumerate_pixels_mut() {
            *pixel = Rgb([x as u8, y as u8, 0]);
        }

        let rect = Rect {
            x: 35,
            y: 25,
            width: 5,
            height: 5,
        };
        let crop = crop_selection(&source, &rect);

        assert_eq!((crop.width(), crop.height()), (5, 5));
        assert_eq!(crop.get_pixel(0, 0), &Rgb([35, 25, 0]));
        assert_eq!(crop.get_pixel(4, 4), &Rgb([39, 29, 0]));
    }
}
