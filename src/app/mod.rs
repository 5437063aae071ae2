// SPDX-License-Identifier: MPL-2.0
//! Application root: a grid of image tiles.
//!
//! The `App` owns one [`ImageTile`] per source given on the command line and
//! the [`LoadContext`] they share. Load requests returned by the tiles are
//! turned into tasks here and their events routed back by index.

mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::media::loader::Request;
use crate::media::source::expand_icon_shorthand;
use crate::media::LoadContext;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::image_tile::{ImageTile, TileStyle};
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 240;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// Root application state.
pub struct App {
    tiles: Vec<ImageTile>,
    context: LoadContext,
    columns: usize,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("tiles", &self.tiles.len())
            .field("columns", &self.columns)
            .finish()
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Launches the application.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds one tile per source and starts loading all of them.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let style = TileStyle::from(&flags.config.tile);
        let theme = flags.config.loader.icon_theme().to_string();
        let now = Instant::now();

        let mut tiles = Vec::with_capacity(flags.sources.len());
        let mut requests = Vec::new();
        for (index, source) in flags.sources.into_iter().enumerate() {
            let mut tile = ImageTile::new(style);
            let source = expand_icon_shorthand(&source, &theme);
            if let Some(request) = tile.set_source(source, &flags.context, now) {
                requests.push((index, request));
            }
            tiles.push(tile);
        }

        let app = Self {
            tiles,
            context: flags.context,
            columns: columns_for_width(WINDOW_DEFAULT_WIDTH as f32),
        };
        let task = app.load_all(requests);
        (app, task)
    }

    fn title(&self) -> String {
        match self.tiles.len() {
            0 => "Tsubame".to_string(),
            1 => "Tsubame - 1 image".to_string(),
            n => format!("Tsubame - {} images", n),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.is_animating()),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tile(index, message) => {
                if let Some(tile) = self.tiles.get_mut(index) {
                    tile.update(message);
                }
                Task::none()
            }
            Message::Tick(now) => {
                for tile in &mut self.tiles {
                    tile.tick(now);
                }
                Task::none()
            }
            Message::ReloadAll => {
                log::info!("reloading {} tile(s)", self.tiles.len());
                let now = Instant::now();
                let requests: Vec<_> = self
                    .tiles
                    .iter_mut()
                    .enumerate()
                    .filter_map(|(index, tile)| {
                        tile.reload(&self.context, now)
                            .map(|request| (index, request))
                    })
                    .collect();
                self.load_all(requests)
            }
            Message::Resized(size) => {
                self.columns = columns_for_width(size.width);
                Task::none()
            }
            Message::Exit => {
                log::debug!("{}", self.cache_summary());
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    #[must_use]
    pub fn tiles(&self) -> &[ImageTile] {
        &self.tiles
    }

    /// Whether any tile is still fading.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tiles.iter().any(ImageTile::is_animating)
    }

    /// One-line summary of the shared image cache.
    fn cache_summary(&self) -> String {
        let cache = self.context.cache.lock();
        let stats = cache.stats();
        format!(
            "image cache: {} entries, {} hits, {} misses ({:.1}% hit rate), {} evictions",
            cache.len(),
            stats.hits,
            stats.misses,
            stats.hit_rate(),
            stats.evictions
        )
    }

    fn load_all(&self, requests: Vec<(usize, Request)>) -> Task<Message> {
        Task::batch(requests.into_iter().map(|(index, request)| {
            ImageTile::load(request, &self.context)
                .map(move |message| Message::Tile(index, message))
        }))
    }
}

/// Number of tile columns that fit in a window of the given width.
fn columns_for_width(width: f32) -> usize {
    let cell = sizing::TILE + spacing::MD;
    let available = (width - spacing::MD).max(0.0);
    ((available / cell).floor() as usize).max(1)
}
