// SPDX-License-Identifier: MPL-2.0
//! Image tile: a placeholder that crossfades into a picture once it loads.
//!
//! The tile is a thin layer over a [`Loader`], the image surface it exposes
//! through [`ImageTile::image`]. `source`, `status` and `progress` are
//! forwarded straight to that surface; the tile only adds the visual state
//! machine:
//!
//! ```text
//!             status == Ready
//!   NotReady ─────────────────▶ Visible
//!      ▲                           │
//!      └───────────────────────────┘
//!             status != Ready
//! ```
//!
//! Entering `Visible` fades the image to 1 and the placeholder to 0; entering
//! `NotReady` reverses both. Opacities are [`Fade`]s, so every write (from the
//! state machine or from a parent) is animated. Progress never touches
//! opacity.

mod view;

use crate::config::TileConfig;
use crate::media::loader::{self, Event, LoadContext, Loader, Request, Status};
use crate::media::ImageData;
use crate::ui::design_tokens::{opacity, palette, radius};
use crate::ui::fade::{Easing, Fade, FadeDuration};
use iced::{Color, Element, Task};
use std::sync::Arc;
use std::time::Instant;

/// Appearance of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub fade_duration: FadeDuration,
    pub easing: Easing,
    /// Opacity of the placeholder layer while no image is shown.
    pub placeholder_opacity: f32,
    pub placeholder_color: Color,
    pub corner_radius: f32,
    /// Draw an error glyph when the load fails.
    pub show_error_indicator: bool,
}

impl Default for TileStyle {
    fn default() -> Self {
        Self {
            fade_duration: FadeDuration::default(),
            easing: Easing::default(),
            placeholder_opacity: opacity::PLACEHOLDER,
            placeholder_color: palette::GRAY_400,
            corner_radius: radius::SM,
            show_error_indicator: false,
        }
    }
}

impl From<&TileConfig> for TileStyle {
    fn from(config: &TileConfig) -> Self {
        Self {
            fade_duration: config.fade_duration(),
            easing: config.easing(),
            placeholder_opacity: config.placeholder_opacity(),
            show_error_indicator: config.show_error_indicator(),
            ..Self::default()
        }
    }
}

/// Which layer dominates the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Placeholder shown, image transparent.
    #[default]
    NotReady,
    /// Image shown, placeholder transparent.
    Visible,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Progress or completion reported by the image surface's load.
    Loaded(Event),
    /// Animation frame.
    Tick(Instant),
}

/// An image tile.
#[derive(Debug, Clone)]
pub struct ImageTile {
    surface: Loader,
    visibility: Visibility,
    image_opacity: Fade,
    background_opacity: Fade,
    style: TileStyle,
    now: Instant,
}

impl Default for ImageTile {
    fn default() -> Self {
        Self::new(TileStyle::default())
    }
}

impl ImageTile {
    #[must_use]
    pub fn new(style: TileStyle) -> Self {
        Self {
            surface: Loader::new(),
            visibility: Visibility::NotReady,
            image_opacity: Fade::new(opacity::TRANSPARENT, style.fade_duration, style.easing),
            background_opacity: Fade::new(
                style.placeholder_opacity,
                style.fade_duration,
                style.easing,
            ),
            style,
            now: Instant::now(),
        }
    }

    // ------------------------------------------------------------------
    // Forwarded surface properties
    // ------------------------------------------------------------------

    #[must_use]
    pub fn source(&self) -> &str {
        self.surface.source()
    }

    /// Assigns a new source to the image surface.
    ///
    /// The returned request, if any, must be turned into a task with
    /// [`ImageTile::load`] so its events come back as [`Message::Loaded`].
    pub fn set_source(
        &mut self,
        source: impl Into<String>,
        context: &LoadContext,
        now: Instant,
    ) -> Option<Request> {
        let shown = self.shown_image();
        let request = self.surface.set_source(source, context);
        self.sync(now);
        self.fade_in_replaced_image(shown, now);
        request
    }

    /// Reloads the current source, bypassing the cache.
    pub fn reload(&mut self, context: &LoadContext, now: Instant) -> Option<Request> {
        let request = self.surface.reload(context);
        self.sync(now);
        request
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.surface.status()
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.surface.progress()
    }

    /// The underlying image surface.
    #[must_use]
    pub fn image(&self) -> &Loader {
        &self.surface
    }

    // ------------------------------------------------------------------
    // Visual state
    // ------------------------------------------------------------------

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn style(&self) -> &TileStyle {
        &self.style
    }

    /// Image opacity at the last observed instant.
    #[must_use]
    pub fn image_opacity(&self) -> f32 {
        self.image_opacity_at(self.now)
    }

    #[must_use]
    pub fn image_opacity_at(&self, now: Instant) -> f32 {
        self.image_opacity.value(now)
    }

    /// Placeholder opacity at the last observed instant.
    #[must_use]
    pub fn background_opacity(&self) -> f32 {
        self.background_opacity_at(self.now)
    }

    #[must_use]
    pub fn background_opacity_at(&self, now: Instant) -> f32 {
        self.background_opacity.value(now)
    }

    /// Requests a new image opacity. The change is animated.
    pub fn set_image_opacity(&mut self, value: f32, now: Instant) {
        self.observe_time(now);
        self.image_opacity.set(value, now);
    }

    /// Requests a new placeholder opacity. The change is animated.
    pub fn set_background_opacity(&mut self, value: f32, now: Instant) {
        self.observe_time(now);
        self.background_opacity.set(value, now);
    }

    /// Whether either layer is still fading at the last observed instant.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.image_opacity.is_animating(self.now) || self.background_opacity.is_animating(self.now)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Loaded(event) => self.observe(event, Instant::now()),
            Message::Tick(now) => self.tick(now),
        }
    }

    /// Feeds a load event to the image surface and reacts to status changes.
    pub fn observe(&mut self, event: Event, now: Instant) {
        if self.surface.apply(event) {
            self.sync(now);
        }
    }

    /// Advances the animation clock.
    pub fn tick(&mut self, now: Instant) {
        self.observe_time(now);
        self.image_opacity.settle(self.now);
        self.background_opacity.settle(self.now);
    }

    /// Turns a load request into a task delivering [`Message::Loaded`].
    pub fn load(request: Request, context: &LoadContext) -> Task<Message> {
        Task::run(loader::run(request, context.clone()), Message::Loaded)
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// The picture currently on screen, if the tile is showing one.
    fn shown_image(&self) -> Option<Arc<ImageData>> {
        match self.visibility {
            Visibility::Visible => self.surface.image().cloned(),
            Visibility::NotReady => None,
        }
    }

    /// A cache hit can swap the picture without leaving `Visible`; the new
    /// picture then fades in over the placeholder like a fresh load.
    fn fade_in_replaced_image(&mut self, shown: Option<Arc<ImageData>>, now: Instant) {
        let Some(shown) = shown else {
            return;
        };
        if self.visibility != Visibility::Visible {
            return;
        }
        let replaced = self
            .surface
            .image()
            .is_some_and(|current| !Arc::ptr_eq(current, &shown));
        if replaced {
            self.image_opacity.replay_from(opacity::TRANSPARENT, now);
        }
    }

    fn observe_time(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Evaluates `status == Ready` and runs the enter action of the resulting
    /// state when it differs from the current one.
    fn sync(&mut self, now: Instant) {
        self.observe_time(now);

        let next = if self.surface.status() == Status::Ready {
            Visibility::Visible
        } else {
            Visibility::NotReady
        };
        if next == self.visibility {
            return;
        }
        self.visibility = next;

        match next {
            Visibility::Visible => {
                self.image_opacity.set(opacity::OPAQUE, now);
                self.background_opacity.set(opacity::TRANSPARENT, now);
            }
            Visibility::NotReady => {
                self.image_opacity.set(opacity::TRANSPARENT, now);
                self.background_opacity
                    .set(self.style.placeholder_opacity, now);
            }
        }
    }
}
