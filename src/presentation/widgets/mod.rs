//! Reusable widgets.

mod image_view;
mod skeleton;

pub use image_view::ImageView;
pub use skeleton::SkeletonWidget;
