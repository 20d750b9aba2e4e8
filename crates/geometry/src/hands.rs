//! Hand proximity and two-hand texting geometry

use landmarks::topology::{LEFT_EAR_TIP, RIGHT_EAR_TIP};
use landmarks::{FaceLandmarks, HandLandmarks};

/// Hand-near-ear search box around each ear tip, in pixels. The box is
/// deliberately taller than wide: a phone held to the ear hangs below it.
const EAR_BOX_DX: f32 = 40.0;
const EAR_BOX_DY: f32 = 90.0;

/// Texting posture: both hand centroids below this normalized line
/// (lower 40 % of the frame).
const TEXTING_LOW_Y: f32 = 0.6;

/// Texting posture: maximum normalized distance between hand centroids.
const TEXTING_MAX_DIST: f32 = 0.35;

/// True if any landmark of `hand` falls inside the search box around either
/// ear-tip landmark.
pub fn hand_near_ear(face: &FaceLandmarks, hand: &HandLandmarks, width: u32, height: u32) -> bool {
    let ear_l = face.point(LEFT_EAR_TIP).to_pixels(width, height);
    let ear_r = face.point(RIGHT_EAR_TIP).to_pixels(width, height);

    hand.points().iter().any(|lm| {
        let (hx, hy) = lm.to_pixels(width, height);
        let near_l = (hx - ear_l.0).abs() < EAR_BOX_DX && (hy - ear_l.1).abs() < EAR_BOX_DY;
        let near_r = (hx - ear_r.0).abs() < EAR_BOX_DX && (hy - ear_r.1).abs() < EAR_BOX_DY;
        near_l || near_r
    })
}

/// True if any landmark of `hand` lies within `max_dist_px` of the face
/// center (pixel coordinates).
pub fn hand_near_face(
    face_center_px: (f32, f32),
    hand: &HandLandmarks,
    width: u32,
    height: u32,
    max_dist_px: f32,
) -> bool {
    hand.points().iter().any(|lm| {
        let (hx, hy) = lm.to_pixels(width, height);
        let dx = face_center_px.0 - hx;
        let dy = face_center_px.1 - hy;
        (dx * dx + dy * dy).sqrt() < max_dist_px
    })
}

/// Normalized centroid of all 21 hand landmarks.
pub fn hand_centroid(hand: &HandLandmarks) -> (f32, f32) {
    let n = hand.points().len() as f32;
    let (sx, sy) = hand
        .points()
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    (sx / n, sy / n)
}

/// Two-hand texting posture: exactly two hands, both centroids in the lower
/// part of the frame, held close together. Near-ear exclusion is the
/// caller's concern (it needs the face).
pub fn texting_geometry(hands: &[HandLandmarks]) -> bool {
    if hands.len() != 2 {
        return false;
    }

    let (x1, y1) = hand_centroid(&hands[0]);
    let (x2, y2) = hand_centroid(&hands[1]);

    let both_low = y1 > TEXTING_LOW_Y && y2 > TEXTING_LOW_Y;
    let dist = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();

    both_low && dist < TEXTING_MAX_DIST
}
