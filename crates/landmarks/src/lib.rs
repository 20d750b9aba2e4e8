//! Landmark Provider Boundary
//!
//! Validated per-frame landmark containers plus the fixed face-mesh
//! topology table. An external landmark provider (camera + mesh model)
//! produces normalized point arrays; everything downstream indexes them
//! through [`topology`] and relies on the point counts enforced here.

pub mod frame;
pub mod topology;

pub use frame::{FaceLandmarks, FrameLandmarks, HandLandmarks, Handedness, Point};

use thiserror::Error;

/// Landmark contract violations
///
/// These indicate a broken provider, not a recoverable runtime condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("{kind} landmark set has {actual} points, expected {expected}")]
    PointCount {
        kind: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("Frame carries {0} hand landmark sets, at most 2 supported")]
    TooManyHands(usize),

    #[error("Frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
}
