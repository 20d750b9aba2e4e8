//! Landmark Geometry
//!
//! Stateless scalar metrics computed from landmark subsets:
//! - Eye / mouth aspect ratios (EAR, MAR)
//! - Iris centroid
//! - Hand-to-ear and hand-to-face proximity
//! - Two-hand texting geometry
//!
//! Every function denormalizes into pixel space internally and guards
//! degenerate (zero-width) geometry by returning 0 instead of dividing.

mod hands;
mod metrics;

pub use hands::{hand_centroid, hand_near_ear, hand_near_face, texting_geometry};
pub use metrics::{aspect_ratio, iris_center, mouth_aspect_ratio};
