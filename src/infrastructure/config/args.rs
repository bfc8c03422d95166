use std::path::PathBuf;

use clap::Parser;

use super::app_config::{LogLevel, SkeletonVariant};

#[derive(Debug, Parser)]
#[command(
    name = "shimmer",
    version,
    about = "A resilient terminal image viewer with retry, fallback, and skeleton loading",
    long_about = None
)]
pub struct CliArgs {
    /// Primary image source (URL or file path).
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Fallback image source used after the primary is exhausted.
    #[arg(short, long, value_name = "SOURCE")]
    pub fallback: Option<String>,

    /// Descriptive alt text shown with the image.
    #[arg(short, long, value_name = "TEXT")]
    pub alt: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Show a skeleton placeholder while loading.
    #[arg(long)]
    pub skeleton: Option<bool>,

    /// Skeleton placeholder shape.
    #[arg(long, value_enum)]
    pub skeleton_variant: Option<SkeletonVariant>,

    /// Disable shimmer and cross-fade animations.
    #[arg(long)]
    pub reduce_motion: Option<bool>,

    /// Delay before retrying the primary source, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = CliArgs::parse_from(["shimmer", "/img/hero.png"]);
        assert_eq!(args.source, "/img/hero.png");
        assert!(args.fallback.is_none());
    }

    #[test]
    fn test_parse_full() {
        let args = CliArgs::parse_from([
            "shimmer",
            "https://example.com/a.png",
            "--fallback",
            "https://example.com/b.png",
            "--alt",
            "Storefront hero",
            "--skeleton-variant",
            "rounded",
            "--reduce-motion",
            "true",
            "--retry-delay-ms",
            "1000",
        ]);
        assert_eq!(args.fallback.as_deref(), Some("https://example.com/b.png"));
        assert_eq!(args.alt.as_deref(), Some("Storefront hero"));
        assert_eq!(args.skeleton_variant, Some(SkeletonVariant::Rounded));
        assert_eq!(args.reduce_motion, Some(true));
        assert_eq!(args.retry_delay_ms, Some(1000));
    }
}
