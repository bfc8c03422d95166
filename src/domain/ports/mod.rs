//! Port definitions.

mod fetch_port;

pub use fetch_port::{FetchResult, ImageFetchPort};

#[cfg(test)]
pub use fetch_port::MockImageFetchPort;
#[cfg(test)]
pub use fetch_port::mock;
