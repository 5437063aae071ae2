// SPDX-License-Identifier: MPL-2.0
//! Error glyph drawn over tiles whose image failed to load.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};

/// A circled exclamation mark.
pub struct ErrorGlyph {
    cache: Cache,
    color: Color,
    size: f32,
}

impl ErrorGlyph {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            cache: Cache::default(),
            color,
            size: sizing::ICON_XL,
        }
    }

    /// Creates a Canvas widget from this glyph.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for ErrorGlyph {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - 3.0;
                let stroke = Stroke::default()
                    .with_width(3.0)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round);

                frame.stroke(&Path::circle(center, radius), stroke.clone());

                let bar = Path::line(
                    Point::new(center.x, center.y - radius * 0.5),
                    Point::new(center.x, center.y + radius * 0.1),
                );
                frame.stroke(&bar, stroke);

                frame.fill(
                    &Path::circle(Point::new(center.x, center.y + radius * 0.45), 2.0),
                    self.color,
                );
            });

        vec![geometry]
    }
}
