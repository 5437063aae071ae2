// SPDX-License-Identifier: MPL-2.0
//! Grid of image tiles with a status caption under each.

use super::{App, Message};
use crate::media::Status;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::image_tile::ImageTile;
use iced::widget::{scrollable, text, Column, Container, Row};
use iced::{alignment, Element, Length};

/// Width of the caption text, in characters, before the source is shortened.
const CAPTION_MAX_CHARS: usize = 22;

pub fn view(app: &App) -> Element<'_, Message> {
    if app.tiles.is_empty() {
        return Container::new(
            text("No image sources. Pass paths, URLs or image://provider/id on the command line.")
                .size(typography::BODY),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into();
    }

    let columns = app.columns.max(1);
    let mut grid = Column::new().spacing(spacing::MD).padding(spacing::MD);
    let mut row = Row::new().spacing(spacing::MD);
    for (index, tile) in app.tiles.iter().enumerate() {
        row = row.push(view_cell(index, tile));
        if (index + 1) % columns == 0 {
            grid = grid.push(row);
            row = Row::new().spacing(spacing::MD);
        }
    }
    if app.tiles.len() % columns != 0 {
        grid = grid.push(row);
    }

    scrollable(Container::new(grid).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_cell(index: usize, tile: &ImageTile) -> Element<'_, Message> {
    let surface = Container::new(tile.view().map(move |message| Message::Tile(index, message)))
        .width(Length::Fixed(sizing::TILE))
        .height(Length::Fixed(sizing::TILE));

    Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fixed(sizing::TILE))
        .push(surface)
        .push(
            text(caption(tile))
                .size(typography::CAPTION)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .into()
}

/// `"<status> · <source>"`, with load progress while loading.
pub(crate) fn caption(tile: &ImageTile) -> String {
    let status = match tile.status() {
        Status::Loading => format!("{} {:.0}%", Status::Loading, tile.progress() * 100.0),
        other => other.to_string(),
    };
    format!("{} · {}", status, shorten(tile.source()))
}

fn shorten(source: &str) -> String {
    let name = source
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(source);
    if name.chars().count() <= CAPTION_MAX_CHARS {
        return name.to_string();
    }
    let head: String = name.chars().take(CAPTION_MAX_CHARS - 1).collect();
    format!("{}…", head)
}
