// SPDX-License-Identifier: MPL-2.0
//! Retrieval of encoded image bytes for a parsed [`ImageSource`].
//!
//! Progress is reported through a callback as a fraction in `[0, 1]`. Only
//! remote bodies with a known length report intermediate values.

use crate::error::{Error, Result};
use crate::media::provider::ProviderRegistry;
use crate::media::source::ImageSource;
use std::time::Duration;

/// User agent sent with remote image requests.
pub const USER_AGENT: &str = concat!("tsubame/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used for remote images.
///
/// # Errors
///
/// [`Error::Network`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Fetches the encoded bytes behind `source`.
///
/// # Errors
///
/// - [`Error::Io`] for unreadable local files
/// - [`Error::Network`] for transport failures and non-success HTTP statuses
/// - [`Error::Provider`] for provider lookups that fail
pub async fn fetch(
    source: &ImageSource,
    registry: &ProviderRegistry,
    client: &reqwest::Client,
    progress_callback: impl FnMut(f32) + Send,
) -> Result<Vec<u8>> {
    match source {
        ImageSource::Local(path) => Ok(tokio::fs::read(path).await?),
        ImageSource::Remote(url) => fetch_remote(client, url, progress_callback).await,
        ImageSource::Provider { provider, id } => {
            let registry = registry.clone();
            let provider = provider.clone();
            let id = id.clone();
            tokio::task::spawn_blocking(move || registry.image(&provider, &id))
                .await
                .map_err(|e| Error::Provider(e.to_string()))?
        }
    }
}

async fn fetch_remote(
    client: &reqwest::Client,
    url: &str,
    mut progress_callback: impl FnMut(f32) + Send,
) -> Result<Vec<u8>> {
    use futures_util::StreamExt;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut body = Vec::with_capacity(usize::try_from(total_size).unwrap_or(0));
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        body.extend_from_slice(&chunk);

        if total_size > 0 {
            #[allow(clippy::cast_precision_loss)]
            let progress = (body.len() as f64 / total_size as f64).min(1.0) as f32;
            progress_callback(progress);
        }
    }

    Ok(body)
}
