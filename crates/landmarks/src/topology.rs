//! Face-mesh topology table
//!
//! Index contract for the 478-point refined face mesh supplied by the
//! landmark provider. These indices are load-bearing: the provider must
//! emit points in this ordering or every downstream metric is garbage.

/// Topology revision the engine was built against.
pub const VERSION: &str = "face-mesh-478/v1";

/// Points per face landmark set (refined mesh with iris rings).
pub const FACE_POINT_COUNT: usize = 478;

/// Points per hand landmark set.
pub const HAND_POINT_COUNT: usize = 21;

/// Nose tip, used as face center and head-pose anchor.
pub const NOSE_TIP: usize = 1;

/// Left eye contour: outer corner, two upper lid, inner corner, two lower lid.
/// Ordering matters for the aspect-ratio formula (vertical pairs 1-5 and 2-4,
/// horizontal span 0-3).
pub const LEFT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Right eye contour, same ordering contract as [`LEFT_EYE`].
pub const RIGHT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Mouth: upper inner lip, lower inner lip, left corner, right corner.
pub const MOUTH: [usize; 4] = [13, 14, 78, 308];

/// Left iris ring (refined landmarks).
pub const LEFT_IRIS: [usize; 4] = [474, 475, 476, 477];

/// Right iris ring (refined landmarks).
pub const RIGHT_IRIS: [usize; 4] = [469, 470, 471, 472];

/// Ear tips, reference points for hand-near-ear detection.
pub const LEFT_EAR_TIP: usize = 234;
pub const RIGHT_EAR_TIP: usize = 454;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_fit_in_face_mesh() {
        let mut all: Vec<usize> = vec![NOSE_TIP, LEFT_EAR_TIP, RIGHT_EAR_TIP];
        all.extend(LEFT_EYE);
        all.extend(RIGHT_EYE);
        all.extend(MOUTH);
        all.extend(LEFT_IRIS);
        all.extend(RIGHT_IRIS);
        for idx in all {
            assert!(idx < FACE_POINT_COUNT, "index {} out of mesh", idx);
        }
    }
}
