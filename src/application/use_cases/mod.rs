//! Use case implementations.

mod load_image;

pub use load_image::{ImageLoadSupervisor, LoadHandle, LoadHooks};
