//! Per-frame detection results

use alerting::{Alert, Severity};
use serde::{Deserialize, Serialize};

/// Severity level of one signal, `None` when the signal is quiet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SignalLevel {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

impl SignalLevel {
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Alert severity for an active level.
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::None => None,
            Self::Mild => Some(Severity::Mild),
            Self::Moderate => Some(Severity::Moderate),
            Self::Severe => Some(Severity::Severe),
        }
    }
}

/// Hand-activity flags for the current frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HandFlags {
    /// Some hand is at an ear (phone-call posture).
    pub near_ear: bool,
    /// Some hand is near the face center.
    pub near_face: bool,
    /// Two-hand texting posture.
    pub texting: bool,
}

impl HandFlags {
    /// Hands are busy with something other than driving.
    pub fn any(&self) -> bool {
        self.near_ear || self.near_face || self.texting
    }
}

/// Read-only snapshot of every sub-detector for one processed frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether the provider supplied a face this frame.
    pub face_detected: bool,

    /// Average of left/right eye aspect ratios (0 with no face).
    pub avg_ear: f32,
    /// Mouth aspect ratio (0 with no face).
    pub mar: f32,

    /// Eye-closure tier (no mild tier exists for this signal).
    pub eye_closure: SignalLevel,
    /// Consecutive closed frames after this frame.
    pub eye_closure_frames: u32,
    /// Blinks accumulated in the current window.
    pub blink_count: u32,
    /// Whether a yawn fired this frame.
    pub yawning: bool,

    pub head_turn: SignalLevel,
    pub head_tilt: SignalLevel,
    pub head_droop: SignalLevel,
    pub gaze_deviation: SignalLevel,

    pub hands: HandFlags,

    pub drowsiness: SignalLevel,
    pub distraction: SignalLevel,

    /// Alerts actually dispatched during this call (post-cooldown).
    pub alerts: Vec<Alert>,
}

impl DetectionResult {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(SignalLevel::None < SignalLevel::Mild);
        assert!(SignalLevel::Mild < SignalLevel::Moderate);
        assert!(SignalLevel::Moderate < SignalLevel::Severe);
    }

    #[test]
    fn none_maps_to_no_severity() {
        assert!(SignalLevel::None.severity().is_none());
        assert_eq!(SignalLevel::Severe.severity(), Some(Severity::Severe));
    }

    #[test]
    fn hands_any_covers_each_flag() {
        assert!(!HandFlags::default().any());
        assert!(HandFlags { near_ear: true, ..Default::default() }.any());
        assert!(HandFlags { near_face: true, ..Default::default() }.any());
        assert!(HandFlags { texting: true, ..Default::default() }.any());
    }
}
