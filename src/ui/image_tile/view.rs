// SPDX-License-Identifier: MPL-2.0
//! Rendering of an [`ImageTile`]: placeholder, image and optional error glyph
//! stacked in that order.

use super::{ImageTile, Message};
use crate::media::Status;
use crate::ui::design_tokens::palette;
use crate::ui::widgets::ErrorGlyph;
use iced::widget::{container, Container, Image, Space, Stack};
use iced::{Border, Color, ContentFit, Element, Length, Theme};

pub fn view(tile: &ImageTile) -> Element<'_, Message> {
    let style = *tile.style();
    let placeholder = Color {
        a: style.placeholder_color.a * tile.background_opacity(),
        ..style.placeholder_color
    };

    let background = Container::new(Space::new().width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(placeholder.into()),
            border: Border {
                radius: style.corner_radius.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(background);

    let image_opacity = tile.image_opacity();
    if let Some(image) = tile.image().image() {
        if image_opacity > 0.0 {
            stack = stack.push(
                Image::new(image.handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(ContentFit::Cover)
                    .opacity(image_opacity),
            );
        }
    }

    if style.show_error_indicator && tile.status() == Status::Error {
        stack = stack.push(
            Container::new(ErrorGlyph::new(palette::ERROR_500).into_element())
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        );
    }

    stack.into()
}
