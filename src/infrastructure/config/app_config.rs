//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::{MotionPreference, RetryPolicy};

const APP_NAME: &str = "shimmer";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "tecknian";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Skeleton placeholder shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonVariant {
    /// Plain rectangle filling the image area.
    #[default]
    Rectangular,
    /// Ellipse inscribed in the image area.
    Circular,
    /// Rectangle with clipped corners.
    Rounded,
}

impl std::fmt::Display for SkeletonVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectangular => write!(f, "rectangular"),
            Self::Circular => write!(f, "circular"),
            Self::Rounded => write!(f, "rounded"),
        }
    }
}

/// Application configuration from file and CLI.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Loader configuration.
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show a skeleton placeholder while loading.
    #[serde(default = "default_true")]
    pub show_skeleton: bool,

    /// Skeleton placeholder shape.
    #[serde(default)]
    pub skeleton_variant: SkeletonVariant,

    /// Suppress shimmer and cross-fade animations.
    #[serde(default)]
    pub reduce_motion: bool,

    /// Cross-fade duration in milliseconds when an image resolves.
    #[serde(default = "default_fade_duration")]
    pub fade_duration_ms: u64,

    /// Render the alt text caption under the image.
    #[serde(default = "default_true")]
    pub show_alt_text: bool,
}

impl UiConfig {
    /// Returns the injected motion capability.
    #[must_use]
    pub const fn motion(&self) -> MotionPreference {
        MotionPreference::from_reduce_flag(self.reduce_motion)
    }

    /// Returns the cross-fade duration.
    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_skeleton: true,
            skeleton_variant: SkeletonVariant::default(),
            reduce_motion: false,
            fade_duration_ms: default_fade_duration(),
            show_alt_text: true,
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Delay before retrying the primary source, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Maximum same-source retries of the primary.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Decoded images wider than this are downscaled.
    #[serde(default = "default_max_width")]
    pub max_image_width: u32,
}

impl LoaderConfig {
    /// Returns the retry policy for the domain state machine.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: default_retry_delay(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout(),
            max_image_width: default_max_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fade_duration() -> u64 {
    300
}

fn default_retry_delay() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    1
}

fn default_timeout() -> u64 {
    30
}

fn default_max_width() -> u32 {
    1024
}

use super::args::CliArgs;

impl AppConfig {
    /// Loads configuration from `path` (or the default location), falling
    /// back to defaults on a missing or unreadable file.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let effective = path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        let Some(effective) = effective else {
            return Self::default();
        };

        match std::fs::read_to_string(&effective) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %effective.display(), error = %e, "Invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(skeleton) = args.skeleton {
            self.ui.show_skeleton = skeleton;
        }
        if let Some(variant) = args.skeleton_variant {
            self.ui.skeleton_variant = variant;
        }
        if let Some(reduce_motion) = args.reduce_motion {
            self.ui.reduce_motion = reduce_motion;
        }
        if let Some(retry_delay_ms) = args.retry_delay_ms {
            self.loader.retry_delay_ms = retry_delay_ms;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.loader.timeout_secs = timeout_secs;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("shimmer.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.ui.show_skeleton);
        assert!(!config.ui.reduce_motion);
        assert_eq!(config.ui.skeleton_variant, SkeletonVariant::Rectangular);
        assert_eq!(config.loader.retry_delay_ms, 2000);
        assert_eq!(config.loader.max_retries, 1);
    }

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [ui]
            show_skeleton = false
            skeleton_variant = "circular"
            reduce_motion = true

            [loader]
            retry_delay_ms = 500
            max_retries = 2
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.ui.show_skeleton);
        assert_eq!(config.ui.skeleton_variant, SkeletonVariant::Circular);
        assert!(config.ui.motion().is_reduced());
        assert_eq!(config.loader.retry_policy().max_retries, 2);
        assert_eq!(
            config.loader.retry_policy().retry_delay,
            Duration::from_millis(500)
        );
        // Unspecified sections keep their defaults.
        assert_eq!(config.loader.timeout_secs, 30);
        assert!(config.ui.show_alt_text);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert_eq!(config.loader.retry_delay_ms, 2000);
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [ valid toml").unwrap();
        let config = AppConfig::load(Some(&path));
        assert!(config.ui.show_skeleton);
    }
}
