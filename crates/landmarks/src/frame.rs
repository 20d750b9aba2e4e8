//! Per-frame landmark containers

use serde::{Deserialize, Serialize};

use crate::topology::{FACE_POINT_COUNT, HAND_POINT_COUNT};
use crate::LandmarkError;

/// A single landmark point, normalized to [0,1] of frame dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Denormalize into pixel coordinates.
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

/// Which hand a landmark set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One face landmark set (478 points, refined mesh).
///
/// Constructed only through [`FaceLandmarks::from_points`], so any value of
/// this type is safe to index with the `topology` constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct FaceLandmarks {
    points: Vec<Point>,
}

impl FaceLandmarks {
    /// Validate and wrap a provider-supplied point array.
    pub fn from_points(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != FACE_POINT_COUNT {
            return Err(LandmarkError::PointCount {
                kind: "face",
                actual: points.len(),
                expected: FACE_POINT_COUNT,
            });
        }
        Ok(Self { points })
    }

    /// Point at a topology index.
    pub fn point(&self, idx: usize) -> Point {
        self.points[idx]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl TryFrom<Vec<Point>> for FaceLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<FaceLandmarks> for Vec<Point> {
    fn from(face: FaceLandmarks) -> Self {
        face.points
    }
}

/// One hand landmark set (21 points) with handedness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HandLandmarksRaw", into = "HandLandmarksRaw")]
pub struct HandLandmarks {
    handedness: Handedness,
    points: Vec<Point>,
}

/// Wire form of [`HandLandmarks`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct HandLandmarksRaw {
    handedness: Handedness,
    points: Vec<Point>,
}

impl TryFrom<HandLandmarksRaw> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(raw: HandLandmarksRaw) -> Result<Self, Self::Error> {
        Self::from_points(raw.handedness, raw.points)
    }
}

impl From<HandLandmarks> for HandLandmarksRaw {
    fn from(hand: HandLandmarks) -> Self {
        Self {
            handedness: hand.handedness,
            points: hand.points,
        }
    }
}

impl HandLandmarks {
    /// Validate and wrap a provider-supplied point array.
    pub fn from_points(handedness: Handedness, points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != HAND_POINT_COUNT {
            return Err(LandmarkError::PointCount {
                kind: "hand",
                actual: points.len(),
                expected: HAND_POINT_COUNT,
            });
        }
        Ok(Self { handedness, points })
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Everything the provider hands the engine for one camera frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FrameLandmarksRaw", into = "FrameLandmarksRaw")]
pub struct FrameLandmarks {
    /// Detected face, if any. Absent faces are a normal condition.
    pub face: Option<FaceLandmarks>,
    /// Zero to two detected hands.
    pub hands: Vec<HandLandmarks>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp (milliseconds, caller's clock).
    pub timestamp_ms: u64,
}

impl FrameLandmarks {
    /// Assemble a frame, enforcing the provider contract.
    pub fn new(
        face: Option<FaceLandmarks>,
        hands: Vec<HandLandmarks>,
        width: u32,
        height: u32,
        timestamp_ms: u64,
    ) -> Result<Self, LandmarkError> {
        if width == 0 || height == 0 {
            return Err(LandmarkError::EmptyFrame { width, height });
        }
        if hands.len() > 2 {
            return Err(LandmarkError::TooManyHands(hands.len()));
        }
        Ok(Self {
            face,
            hands,
            width,
            height,
            timestamp_ms,
        })
    }

    /// Frame with no detections at all.
    ///
    /// Dimensions are assumed valid here; use [`FrameLandmarks::new`] for
    /// provider-supplied values.
    pub fn empty(width: u32, height: u32, timestamp_ms: u64) -> Self {
        Self {
            face: None,
            hands: Vec::new(),
            width,
            height,
            timestamp_ms,
        }
    }
}

/// Wire form of [`FrameLandmarks`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct FrameLandmarksRaw {
    face: Option<FaceLandmarks>,
    #[serde(default)]
    hands: Vec<HandLandmarks>,
    width: u32,
    height: u32,
    timestamp_ms: u64,
}

impl TryFrom<FrameLandmarksRaw> for FrameLandmarks {
    type Error = LandmarkError;

    fn try_from(raw: FrameLandmarksRaw) -> Result<Self, Self::Error> {
        Self::new(raw.face, raw.hands, raw.width, raw.height, raw.timestamp_ms)
    }
}

impl From<FrameLandmarks> for FrameLandmarksRaw {
    fn from(frame: FrameLandmarks) -> Self {
        Self {
            face: frame.face,
            hands: frame.hands,
            width: frame.width,
            height: frame.height,
            timestamp_ms: frame.timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_points() -> Vec<Point> {
        vec![Point::default(); FACE_POINT_COUNT]
    }

    #[test]
    fn face_rejects_wrong_point_count() {
        let err = FaceLandmarks::from_points(vec![Point::default(); 100]).unwrap_err();
        assert!(matches!(err, LandmarkError::PointCount { expected: 478, .. }));
    }

    #[test]
    fn hand_rejects_wrong_point_count() {
        let err = HandLandmarks::from_points(Handedness::Left, vec![Point::default(); 20])
            .unwrap_err();
        assert!(matches!(err, LandmarkError::PointCount { expected: 21, .. }));
    }

    #[test]
    fn frame_rejects_three_hands() {
        let hand = || {
            HandLandmarks::from_points(Handedness::Left, vec![Point::default(); 21]).unwrap()
        };
        let err = FrameLandmarks::new(None, vec![hand(), hand(), hand()], 640, 480, 0).unwrap_err();
        assert_eq!(err, LandmarkError::TooManyHands(3));
    }

    #[test]
    fn frame_rejects_zero_dimensions() {
        let err = FrameLandmarks::new(None, Vec::new(), 0, 480, 0).unwrap_err();
        assert!(matches!(err, LandmarkError::EmptyFrame { .. }));
    }

    #[test]
    fn face_roundtrips_through_serde() {
        let face = FaceLandmarks::from_points(face_points()).unwrap();
        let json = serde_json::to_string(&face).unwrap();
        let back: FaceLandmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(back.points().len(), FACE_POINT_COUNT);
    }
}
