//! Entity definitions for image loading.

mod load_state;
mod motion;
mod source;

pub use load_state::{FailureAction, LoadPhase, LoadStateMachine, RetryPolicy};
pub use motion::MotionPreference;
pub use source::{ImageId, SourceKind, SourceSet};
