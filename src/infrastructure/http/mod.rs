//! Image fetch adapters.

mod fetcher;

pub use fetcher::HttpImageFetcher;
