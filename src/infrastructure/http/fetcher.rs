//! HTTP and filesystem fetch adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::entities::ImageId;
use crate::domain::errors::FetchError;
use crate::domain::ports::{FetchResult, ImageFetchPort};

/// Fetches images over HTTP(S) or from local paths and decodes them.
///
/// Oversized images are downscaled at decode time so terminal protocols
/// never ship more pixels than they can show.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_width: u32,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the given request timeout and decode cap.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration, max_width: u32) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, max_width })
    }

    async fn download(&self, url: &str) -> FetchResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {e}")))
    }

    async fn read_local(url: &str) -> FetchResult<Bytes> {
        let data = tokio::fs::read(url)
            .await
            .map_err(|e| FetchError::io(format!("{url}: {e}")))?;
        Ok(Bytes::from(data))
    }
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Arc<image::DynamicImage>> {
        let is_remote = url.starts_with("http://") || url.starts_with("https://");
        let bytes = if is_remote {
            debug!(id = %ImageId::from_url(url), url = %url, "Downloading image");
            self.download(url).await?
        } else {
            debug!(path = %url, "Reading local image");
            Self::read_local(url).await?
        };

        let max_width = self.max_width;
        let decoded = tokio::task::spawn_blocking(move || -> Result<_, FetchError> {
            let img = image::load_from_memory(&bytes)
                .map_err(|e| FetchError::decode(format!("failed to decode image: {e}")))?;

            if img.width() > max_width {
                Ok(img.resize(
                    max_width,
                    max_width,
                    image::imageops::FilterType::Lanczos3,
                ))
            } else {
                Ok(img)
            }
        })
        .await
        .map_err(|e| FetchError::decode(format!("decode task panicked: {e}")))??;

        Ok(Arc::new(decoded))
    }
}
