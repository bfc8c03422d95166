//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image fetching over HTTP and the local filesystem.
pub mod http;

pub use config::{AppConfig, CliArgs, LoaderConfig, LogLevel, SkeletonVariant, UiConfig};
pub use http::HttpImageFetcher;
