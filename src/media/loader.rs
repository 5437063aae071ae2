// SPDX-License-Identifier: MPL-2.0
//! The image-loading surface behind every tile.
//!
//! A [`Loader`] owns the `source` → `status`/`progress`/`image` relationship.
//! Assigning a source starts a new *generation*; the work itself runs as an
//! async stream ([`run`]) whose [`Event`]s are fed back through
//! [`Loader::apply`] on the UI thread. Events from older generations are
//! dropped, so reassigning the source is the only cancellation mechanism and
//! an in-flight load is left to finish and be discarded.

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::media::cache::SharedImageCache;
use crate::media::fetch;
use crate::media::image::{self, ImageData};
use crate::media::provider::{IconProvider, ProviderRegistry};
use crate::media::source::ImageSource;
use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream};
use std::fmt;
use std::sync::Arc;

/// Load status of an image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No source assigned.
    #[default]
    Null,
    Loading,
    Ready,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Null => "null",
            Status::Loading => "loading",
            Status::Ready => "ready",
            Status::Error => "error",
        };
        f.write_str(label)
    }
}

/// Notifications produced by a running load.
#[derive(Debug, Clone)]
pub enum Event {
    Progress {
        generation: u64,
        progress: f32,
    },
    Finished {
        generation: u64,
        result: Result<Arc<ImageData>>,
    },
}

impl Event {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Event::Progress { generation, .. } | Event::Finished { generation, .. } => *generation,
        }
    }
}

/// Work to perform for one generation of a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub generation: u64,
    /// Raw source string, used as the cache key.
    pub key: String,
    pub source: ImageSource,
}

/// Everything a load needs besides the request: providers, the shared cache
/// and the HTTP client.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub registry: ProviderRegistry,
    pub cache: SharedImageCache,
    pub client: reqwest::Client,
    /// Decode on the blocking thread pool rather than on the async worker.
    pub async_decode: bool,
}

impl LoadContext {
    /// Builds a context from the `[loader]` configuration section.
    ///
    /// The `icon` provider is registered when a themes directory can be
    /// resolved.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] if the HTTP client cannot be created.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let mut registry = ProviderRegistry::new();
        if let Some(themes_dir) = config.themes_dir() {
            log::debug!("icon provider serving {}", themes_dir.display());
            registry.register("icon", IconProvider::new(themes_dir));
        }

        Ok(Self {
            registry,
            cache: SharedImageCache::new(config.cache_max_images()),
            client: fetch::build_client(config.request_timeout())?,
            async_decode: config.async_decode(),
        })
    }
}

/// Source, status, progress and picture of one image surface.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    source: String,
    status: Status,
    progress: f32,
    image: Option<Arc<ImageData>>,
    generation: u64,
    last_error: Option<Error>,
}

impl Loader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Load progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The picture from the most recent successful load.
    ///
    /// It is kept while a new source loads or fails, so it is only current
    /// when [`status`](Self::status) is [`Status::Ready`].
    #[must_use]
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The error that ended the current generation, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Assigns a new source and starts a new generation.
    ///
    /// - an empty source resolves to [`Status::Null`]
    /// - an unparsable source resolves to [`Status::Error`]
    /// - a cached source resolves to [`Status::Ready`] right away
    /// - anything else becomes [`Status::Loading`] and a [`Request`] is
    ///   returned for the caller to [`run`]
    pub fn set_source(&mut self, source: impl Into<String>, context: &LoadContext) -> Option<Request> {
        self.source = source.into();
        self.begin(context, true)
    }

    /// Loads the current source again, bypassing the cache.
    pub fn reload(&mut self, context: &LoadContext) -> Option<Request> {
        context.cache.lock().invalidate(self.cache_key());
        self.begin(context, false)
    }

    /// Key of the current source in the shared cache.
    fn cache_key(&self) -> &str {
        self.source.trim()
    }

    fn begin(&mut self, context: &LoadContext, use_cache: bool) -> Option<Request> {
        self.generation += 1;
        self.progress = 0.0;
        self.last_error = None;

        let source = match ImageSource::parse(&self.source) {
            Ok(Some(source)) => source,
            Ok(None) => {
                self.status = Status::Null;
                return None;
            }
            Err(err) => {
                log::error!("{}", err);
                self.fail(err);
                return None;
            }
        };

        if use_cache {
            if let Some(image) = context.cache.lock().get(self.cache_key()) {
                log::debug!("cache hit for {}", self.source);
                self.status = Status::Ready;
                self.progress = 1.0;
                self.image = Some(image);
                return None;
            }
        }

        log::debug!("loading {} (generation {})", source, self.generation);
        self.status = Status::Loading;
        Some(Request {
            generation: self.generation,
            key: self.cache_key().to_string(),
            source,
        })
    }

    /// Applies an event from [`run`].
    ///
    /// Returns `true` if the status changed. Events from previous
    /// generations and progress outside of [`Status::Loading`] are ignored.
    pub fn apply(&mut self, event: Event) -> bool {
        if event.generation() != self.generation {
            log::debug!(
                "discarding stale load event (generation {} != {})",
                event.generation(),
                self.generation
            );
            return false;
        }

        let previous = self.status;
        match event {
            Event::Progress { progress, .. } => {
                if self.status == Status::Loading && progress.is_finite() {
                    self.progress = progress.clamp(self.progress, 1.0);
                }
            }
            Event::Finished { result, .. } => {
                if self.status != Status::Loading {
                    return false;
                }
                match result {
                    Ok(image) => {
                        log::debug!(
                            "loaded {} ({}x{})",
                            self.source,
                            image.width,
                            image.height
                        );
                        self.status = Status::Ready;
                        self.progress = 1.0;
                        self.image = Some(image);
                    }
                    Err(err) => {
                        log::warn!("failed to load {}: {}", self.source, err);
                        self.fail(err);
                    }
                }
            }
        }
        self.status != previous
    }

    fn fail(&mut self, err: Error) {
        self.status = Status::Error;
        self.last_error = Some(err);
    }
}

/// Runs `request`: fetch, decode, cache. Emits progress events followed by
/// exactly one [`Event::Finished`].
pub fn run(request: Request, context: LoadContext) -> impl Stream<Item = Event> {
    iced::stream::channel(32, move |mut output: mpsc::Sender<Event>| async move {
        let generation = request.generation;

        let result = {
            let mut progress_tx = output.clone();
            load(&request, &context, move |progress| {
                let _ = progress_tx.try_send(Event::Progress {
                    generation,
                    progress,
                });
            })
            .await
        };

        let _ = output.send(Event::Finished { generation, result }).await;
    })
}

async fn load(
    request: &Request,
    context: &LoadContext,
    progress_callback: impl FnMut(f32) + Send,
) -> Result<Arc<ImageData>> {
    let bytes = fetch::fetch(
        &request.source,
        &context.registry,
        &context.client,
        progress_callback,
    )
    .await?;
    let hint = request.source.name_hint();

    let decoded = if context.async_decode {
        tokio::task::spawn_blocking(move || image::decode(&bytes, Some(&hint)))
            .await
            .map_err(|e| Error::Decode(e.to_string()))??
    } else {
        image::decode(&bytes, Some(&hint))?
    };

    let decoded = Arc::new(decoded);
    context
        .cache
        .lock()
        .insert(request.key.clone(), Arc::clone(&decoded));
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_bytes;
    use iced::futures::StreamExt;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn context() -> LoadContext {
        LoadContext {
            registry: ProviderRegistry::new(),
            cache: SharedImageCache::new(8),
            client: fetch::build_client(Duration::from_secs(1)).unwrap(),
            async_decode: true,
        }
    }

    fn pixel() -> Arc<ImageData> {
        Arc::new(ImageData::from_rgba(1, 1, vec![0, 0, 0, 255]))
    }

    #[test]
    fn new_loader_is_null() {
        let loader = Loader::new();
        assert_eq!(loader.status(), Status::Null);
        assert_eq!(loader.progress(), 0.0);
        assert!(loader.image().is_none());
    }

    #[test]
    fn set_source_starts_loading() {
        let ctx = context();
        let mut loader = Loader::new();
        let request = loader.set_source("/tmp/a.png", &ctx).expect("request");

        assert_eq!(loader.status(), Status::Loading);
        assert_eq!(request.generation, loader.generation());
        assert_eq!(request.key, "/tmp/a.png");
    }

    #[test]
    fn surrounding_whitespace_shares_cache_entry() {
        let ctx = context();
        ctx.cache.lock().insert("/tmp/a.png", pixel());
        let mut loader = Loader::new();

        assert!(loader.set_source("  /tmp/a.png ", &ctx).is_none());
        assert_eq!(loader.status(), Status::Ready);

        let request = loader.reload(&ctx).expect("request");
        assert_eq!(request.key, "/tmp/a.png");
        assert!(!ctx.cache.lock().contains("/tmp/a.png"));
    }

    #[test]
    fn empty_source_is_null() {
        let ctx = context();
        let mut loader = Loader::new();
        assert!(loader.set_source("", &ctx).is_none());
        assert_eq!(loader.status(), Status::Null);
    }

    #[test]
    fn malformed_provider_source_is_error() {
        let ctx = context();
        let mut loader = Loader::new();
        assert!(loader.set_source("image://icon", &ctx).is_none());
        assert_eq!(loader.status(), Status::Error);
        assert!(matches!(loader.last_error(), Some(Error::Provider(_))));
    }

    #[test]
    fn finished_event_makes_loader_ready() {
        let ctx = context();
        let mut loader = Loader::new();
        let request = loader.set_source("/tmp/a.png", &ctx).unwrap();

        let changed = loader.apply(Event::Finished {
            generation: request.generation,
            result: Ok(pixel()),
        });

        assert!(changed);
        assert_eq!(loader.status(), Status::Ready);
        assert_eq!(loader.progress(), 1.0);
        assert!(loader.image().is_some());
    }

    #[test]
    fn failed_load_keeps_previous_image() {
        let ctx = context();
        let mut loader = Loader::new();
        let first = loader.set_source("/tmp/a.png", &ctx).unwrap();
        loader.apply(Event::Finished {
            generation: first.generation,
            result: Ok(pixel()),
        });

        let second = loader.set_source("/tmp/b.png", &ctx).unwrap();
        loader.apply(Event::Finished {
            generation: second.generation,
            result: Err(Error::Decode("bad".into())),
        });

        assert_eq!(loader.status(), Status::Error);
        assert!(loader.image().is_some());
        assert_eq!(loader.last_error(), Some(&Error::Decode("bad".into())));
    }

    #[test]
    fn stale_events_are_discarded() {
        let ctx = context();
        let mut loader = Loader::new();
        let stale = loader.set_source("/tmp/a.png", &ctx).unwrap();
        let _current = loader.set_source("/tmp/b.png", &ctx).unwrap();

        let changed = loader.apply(Event::Finished {
            generation: stale.generation,
            result: Ok(pixel()),
        });

        assert!(!changed);
        assert_eq!(loader.status(), Status::Loading);
        assert!(loader.image().is_none());
    }

    #[test]
    fn progress_is_clamped_and_monotonic() {
        let ctx = context();
        let mut loader = Loader::new();
        let request = loader.set_source("/tmp/a.png", &ctx).unwrap();
        let generation = request.generation;

        assert!(!loader.apply(Event::Progress {
            generation,
            progress: 0.6
        }));
        loader.apply(Event::Progress {
            generation,
            progress: 0.2,
        });
        assert_eq!(loader.progress(), 0.6);

        loader.apply(Event::Progress {
            generation,
            progress: 7.0,
        });
        assert_eq!(loader.progress(), 1.0);
        assert_eq!(loader.status(), Status::Loading);
    }

    #[test]
    fn cache_hit_skips_loading() {
        let ctx = context();
        ctx.cache.lock().insert("/tmp/a.png", pixel());

        let mut loader = Loader::new();
        assert!(loader.set_source("/tmp/a.png", &ctx).is_none());
        assert_eq!(loader.status(), Status::Ready);
        assert_eq!(loader.progress(), 1.0);
    }

    #[test]
    fn reload_bypasses_cache() {
        let ctx = context();
        ctx.cache.lock().insert("/tmp/a.png", pixel());

        let mut loader = Loader::new();
        loader.set_source("/tmp/a.png", &ctx);
        let request = loader.reload(&ctx).expect("reload should issue a request");

        assert_eq!(loader.status(), Status::Loading);
        assert_eq!(request.generation, loader.generation());
        assert!(!ctx.cache.lock().contains("/tmp/a.png"));
    }

    #[tokio::test]
    async fn run_decodes_local_file_and_fills_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        fs::write(&path, png_bytes(3, 2)).unwrap();
        let key = path.to_string_lossy().into_owned();

        let ctx = context();
        let mut loader = Loader::new();
        let request = loader.set_source(key.clone(), &ctx).unwrap();

        let events: Vec<Event> = run(request, ctx.clone()).collect().await;
        let last = events.last().cloned().expect("at least one event");
        assert!(matches!(last, Event::Finished { .. }));

        for event in events {
            loader.apply(event);
        }
        assert_eq!(loader.status(), Status::Ready);
        assert_eq!(loader.image().map(|i| (i.width, i.height)), Some((3, 2)));
        assert!(ctx.cache.lock().contains(&key));
    }

    #[tokio::test]
    async fn run_reports_decode_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not a png").unwrap();

        let mut ctx = context();
        ctx.async_decode = false;
        let mut loader = Loader::new();
        let request = loader
            .set_source(path.to_string_lossy().into_owned(), &ctx)
            .unwrap();

        let events: Vec<Event> = run(request, ctx).collect().await;
        for event in events {
            loader.apply(event);
        }
        assert_eq!(loader.status(), Status::Error);
        assert!(matches!(loader.last_error(), Some(Error::Decode(_))));
    }
}
