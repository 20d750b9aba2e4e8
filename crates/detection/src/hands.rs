//! Hand-activity classifiers
//!
//! Evaluated per hand, every frame, with no counter; these categories are
//! ungated downstream as well, so they re-fire as long as the posture
//! holds. All three require a face: the ear and face-center reference
//! points come from it.

use alerting::{AlertCategory, Severity};
use landmarks::{FaceLandmarks, HandLandmarks};

use crate::analysis::HandFlags;
use crate::classifiers::DebouncePolicy;
use crate::config::DetectionConfig;
use crate::emit::FrameEmitter;

pub const HAND_POLICY: DebouncePolicy = DebouncePolicy::EveryFrame;

/// Classify hand positions against the face.
///
/// Per hand: at an ear wins over near the face. The two-hand texting
/// posture additionally requires that neither hand is at an ear (holding a
/// phone to the ear is already the stronger call).
pub fn classify_hands(
    config: &DetectionConfig,
    emitter: &mut FrameEmitter<'_>,
    face: &FaceLandmarks,
    face_center_px: (f32, f32),
    hands: &[HandLandmarks],
    width: u32,
    height: u32,
) -> HandFlags {
    let mut flags = HandFlags::default();

    for hand in hands {
        if geometry::hand_near_ear(face, hand, width, height) {
            emitter.trigger(
                AlertCategory::PhoneUsage,
                Severity::Moderate,
                "Likely mobile call",
                0.7,
                None,
            );
            flags.near_ear = true;
        } else if geometry::hand_near_face(
            face_center_px,
            hand,
            width,
            height,
            config.hand_near_face_px,
        ) {
            emitter.trigger(
                AlertCategory::HandNearFace,
                Severity::Mild,
                "Hand near the face",
                0.6,
                None,
            );
            flags.near_face = true;
        }
    }

    if geometry::texting_geometry(hands) && !flags.near_ear {
        emitter.trigger(
            AlertCategory::Texting,
            Severity::Severe,
            "Possible texting observed",
            0.85,
            None,
        );
        flags.texting = true;
    }

    flags
}
