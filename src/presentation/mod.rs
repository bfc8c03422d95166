//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// UI screens.
pub mod ui;
/// Derived presentation state.
pub mod view_model;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
pub use view_model::ImageViewModel;
