//! Shimmer - A resilient terminal image viewer.
//!
//! This crate loads a single logical image from a primary source with retry
//! and fallback semantics, rendering a skeleton placeholder in the terminal
//! until the image resolves or is declared failed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the load supervisor and its events.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "shimmer";
