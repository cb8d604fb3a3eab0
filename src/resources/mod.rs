//! Kubernetes resource types and traits

pub mod pod;
pub mod traits;

pub use pod::{has_image, image_matches, pod_status};
pub use traits::*;
