//! Application layer with the load supervisor and its lifecycle events.

/// Load lifecycle events.
pub mod events;
/// Use case implementations.
pub mod use_cases;

pub use events::LoadEvent;
pub use use_cases::{ImageLoadSupervisor, LoadHandle, LoadHooks};
