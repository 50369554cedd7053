use fissure_gauge::DragExtents;
use iced::widget::canvas::{self, Frame, Geometry, Image, Path, Stroke};
use iced::widget::image as iced_image;
use iced::{Color, Event, Point, Rectangle, Renderer, Size, Theme, mouse};

use crate::Message;

const RUBBER_BAND_COLOR: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 0.9,
};

/// Canvas program that renders the source image aspect-fit and turns a
/// left-button drag into a [`DragExtents`] message in image pixel coordinates.
///
/// The widget itself only does coordinate mapping; cropping and measuring are
/// the controller's job, driven by [`Message::SelectionMade`].
pub struct ImageSelector {
    handle: iced_image::Handle,
    image_width: u32,
    image_height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Drag {
    from: Point,
    to: Point,
}

impl ImageSelector {
    pub fn new(handle: iced_image::Handle, image_width: u32, image_height: u32) -> Self {
        Self {
            handle,
            image_width,
            image_height,
        }
    }

    /// Where the image lands inside the canvas: scaled to fit while keeping its
    /// aspect ratio, centered on both axes.
    fn fitted_rect(&self, canvas_size: Size) -> Rectangle {
        fit_image(
            Size::new(self.image_width as f32, self.image_height as f32),
            canvas_size,
        )
    }

    fn extents_from(&self, fit: &Rectangle, drag: &Drag) -> DragExtents {
        let (x1, y1) = to_image_space(fit, self.image_width, self.image_height, drag.from);
        let (x2, y2) = to_image_space(fit, self.image_width, self.image_height, drag.to);
        DragExtents { x1, x2, y1, y2 }
    }
}

/// Scales `image` to fit `bounds` preserving aspect ratio, centered.
fn fit_image(image: Size, bounds: Size) -> Rectangle {
    if image.width <= 0.0 || image.height <= 0.0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Rectangle::with_size(Size::ZERO);
    }

    let scale = (bounds.width / image.width).min(bounds.height / image.height);
    let size = Size::new(image.width * scale, image.height * scale);

    Rectangle {
        x: (bounds.width - size.width) / 2.0,
        y: (bounds.height - size.height) / 2.0,
        width: size.width,
        height: size.height,
    }
}

/// Maps a canvas-space point into image pixel coordinates given the fitted rect.
fn to_image_space(fit: &Rectangle, image_width: u32, image_height: u32, point: Point) -> (f32, f32) {
    if fit.width <= 0.0 || fit.height <= 0.0 {
        return (0.0, 0.0);
    }

    let x = (point.x - fit.x) * image_width as f32 / fit.width;
    let y = (point.y - fit.y) * image_height as f32 / fit.height;
    (x, y)
}

impl canvas::Program<Message> for ImageSelector {
    type State = Option<Drag>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                *state = Some(Drag {
                    from: position,
                    to: position,
                });
                Some(canvas::Action::request_redraw().and_capture())
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let drag = state.as_mut()?;
                drag.to = cursor.position_in(bounds)?;
                Some(canvas::Action::request_redraw())
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let drag = state.take()?;
                let fit = self.fitted_rect(bounds.size());
                let extents = self.extents_from(&fit, &drag);
                Some(canvas::Action::publish(Message::SelectionMade(extents)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let fit = self.fitted_rect(bounds.size());
        if fit.width > 0.0 && fit.height > 0.0 {
            frame.draw_image(fit, Image::new(self.handle.clone()));
        }

        if let Some(drag) = state {
            let top_left = Point::new(drag.from.x.min(drag.to.x), drag.from.y.min(drag.to.y));
            let size = Size::new(
                (drag.from.x - drag.to.x).abs(),
                (drag.from.y - drag.to.y).abs(),
            );
            frame.stroke(
                &Path::rectangle(top_left, size),
                Stroke::default()
                    .with_color(RUBBER_BAND_COLOR)
                    .with_width(2.0),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
