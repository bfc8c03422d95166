//! Configuration handling.

mod app_config;
mod args;

pub use app_config::{AppConfig, LoaderConfig, LogLevel, SkeletonVariant, UiConfig};
pub use args::CliArgs;
