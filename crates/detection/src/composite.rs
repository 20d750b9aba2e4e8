//! Composite drowsiness / distraction assessment
//!
//! Computed fresh each frame from the classifier outputs alone; no history
//! is consulted. A frame can legitimately carry both a per-signal alert and
//! a composite one.

use alerting::{AlertCategory, Severity};

use crate::analysis::{HandFlags, SignalLevel};
use crate::emit::FrameEmitter;
use crate::pose::HeadPoseLevels;

/// Drowsiness: eye closure plus a secondary fatigue indicator (head droop
/// or an active yawn).
pub fn assess_drowsiness(
    emitter: &mut FrameEmitter<'_>,
    eye_closure: SignalLevel,
    head_droop: SignalLevel,
    yawning: bool,
) -> SignalLevel {
    let secondary = head_droop.is_active() || yawning;
    if !secondary {
        return SignalLevel::None;
    }

    if eye_closure >= SignalLevel::Severe {
        emitter.trigger(
            AlertCategory::Drowsiness,
            Severity::Severe,
            "Severe DROWSINESS Observed",
            0.9,
            None,
        );
        SignalLevel::Severe
    } else if eye_closure >= SignalLevel::Moderate {
        emitter.trigger(
            AlertCategory::Drowsiness,
            Severity::Moderate,
            "Moderate DROWSINESS Observed",
            0.75,
            None,
        );
        SignalLevel::Moderate
    } else {
        SignalLevel::None
    }
}

/// Distraction: head turned or tilted away while the hands are busy.
/// The severe combination is checked first.
pub fn assess_distraction(
    emitter: &mut FrameEmitter<'_>,
    pose: HeadPoseLevels,
    hands: HandFlags,
) -> SignalLevel {
    if !hands.any() {
        return SignalLevel::None;
    }

    let head_away = pose.turn.max(pose.tilt);
    if head_away >= SignalLevel::Moderate {
        emitter.trigger(
            AlertCategory::Distraction,
            Severity::Severe,
            "Severe DISTRACTION Observed",
            0.85,
            None,
        );
        SignalLevel::Severe
    } else if head_away >= SignalLevel::Mild {
        emitter.trigger(
            AlertCategory::Distraction,
            Severity::Moderate,
            "Moderate DISTRACTION Observed",
            0.7,
            None,
        );
        SignalLevel::Moderate
    } else {
        SignalLevel::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertEmitter, CooldownConfig};

    fn with_frame<R>(f: impl FnOnce(&mut FrameEmitter<'_>) -> R) -> (R, usize) {
        let mut emitter = AlertEmitter::new(CooldownConfig::default());
        let mut frame = FrameEmitter::new(&mut emitter, 0);
        let out = f(&mut frame);
        let count = frame.dispatched().len();
        (out, count)
    }

    #[test]
    fn severe_drowsiness_needs_severe_closure_plus_secondary() {
        let (level, dispatched) = with_frame(|frame| {
            assess_drowsiness(frame, SignalLevel::Severe, SignalLevel::Mild, false)
        });
        assert_eq!(level, SignalLevel::Severe);
        assert_eq!(dispatched, 1);

        let (level, _) = with_frame(|frame| {
            assess_drowsiness(frame, SignalLevel::Severe, SignalLevel::None, true)
        });
        assert_eq!(level, SignalLevel::Severe);
    }

    #[test]
    fn moderate_closure_with_yawn_is_moderate_drowsiness() {
        let (level, _) = with_frame(|frame| {
            assess_drowsiness(frame, SignalLevel::Moderate, SignalLevel::None, true)
        });
        assert_eq!(level, SignalLevel::Moderate);
    }

    #[test]
    fn closure_alone_is_not_drowsiness() {
        let (level, dispatched) = with_frame(|frame| {
            assess_drowsiness(frame, SignalLevel::Severe, SignalLevel::None, false)
        });
        assert_eq!(level, SignalLevel::None);
        assert_eq!(dispatched, 0);
    }

    #[test]
    fn secondary_alone_is_not_drowsiness() {
        let (level, dispatched) = with_frame(|frame| {
            assess_drowsiness(frame, SignalLevel::None, SignalLevel::Severe, true)
        });
        assert_eq!(level, SignalLevel::None);
        assert_eq!(dispatched, 0);
    }

    #[test]
    fn distraction_requires_busy_hands() {
        let pose = HeadPoseLevels {
            turn: SignalLevel::Severe,
            ..Default::default()
        };
        let (level, dispatched) =
            with_frame(|frame| assess_distraction(frame, pose, HandFlags::default()));
        assert_eq!(level, SignalLevel::None);
        assert_eq!(dispatched, 0);
    }

    #[test]
    fn distraction_tiers_on_worst_head_signal() {
        let busy = HandFlags {
            near_face: true,
            ..Default::default()
        };

        let mild_turn = HeadPoseLevels {
            turn: SignalLevel::Mild,
            ..Default::default()
        };
        let (level, _) = with_frame(|frame| assess_distraction(frame, mild_turn, busy));
        assert_eq!(level, SignalLevel::Moderate);

        let moderate_tilt = HeadPoseLevels {
            tilt: SignalLevel::Moderate,
            ..Default::default()
        };
        let (level, _) = with_frame(|frame| assess_distraction(frame, moderate_tilt, busy));
        assert_eq!(level, SignalLevel::Severe);
    }
}
