//! Domain layer with core loading entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{
    FailureAction, ImageId, LoadPhase, LoadStateMachine, MotionPreference, RetryPolicy, SourceKind,
    SourceSet,
};
pub use errors::FetchError;
pub use ports::{FetchResult, ImageFetchPort};
