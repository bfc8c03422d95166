//! Port definition for image fetching.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Port for fetching and decoding one image resource.
///
/// The adapter owns transport concerns (HTTP, filesystem, decoding); the
/// caller owns retry and fallback policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the resource at `url` and decodes it into an image.
    async fn fetch(&self, url: &str) -> FetchResult<Arc<image::DynamicImage>>;
}
