//! Detection thresholds

use serde::{Deserialize, Serialize};

/// Detection thresholds, immutable until replaced or merged.
///
/// Changes take effect from the next processed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Average EAR below this reads as closed eyes.
    pub ear_threshold: f32,

    /// Consecutive closed frames before the moderate eye-closure tier.
    pub eye_closed_frames_threshold: u32,

    /// Blinks per minute that trigger the high-blink-rate alert.
    pub blink_rate_threshold: u32,

    /// MAR above this reads as an open (yawning) mouth.
    pub mar_threshold: f32,

    /// Accumulated yawn frames before the yawning alert.
    pub yawn_frames_threshold: u32,

    /// Normalized gaze offset from the calibrated center.
    pub gaze_deviation_threshold: f32,

    /// Normalized nose-tip offset from the calibrated center.
    pub head_turn_threshold: f32,

    /// Hand-to-face-center distance in pixels.
    pub hand_near_face_px: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.140,
            eye_closed_frames_threshold: 9,
            blink_rate_threshold: 5,
            mar_threshold: 0.6,
            yawn_frames_threshold: 3,
            gaze_deviation_threshold: 0.05,
            head_turn_threshold: 0.08,
            hand_near_face_px: 200.0,
        }
    }
}

impl DetectionConfig {
    /// Stricter thresholds (fire earlier).
    pub fn strict() -> Self {
        Self {
            eye_closed_frames_threshold: 6,
            mar_threshold: 0.5,
            gaze_deviation_threshold: 0.04,
            head_turn_threshold: 0.06,
            ..Default::default()
        }
    }

    /// More lenient thresholds (fire later).
    pub fn lenient() -> Self {
        Self {
            eye_closed_frames_threshold: 12,
            mar_threshold: 0.7,
            gaze_deviation_threshold: 0.08,
            head_turn_threshold: 0.12,
            ..Default::default()
        }
    }

    /// Apply a partial update.
    pub fn merge(&mut self, patch: DetectionConfigPatch) {
        if let Some(v) = patch.ear_threshold {
            self.ear_threshold = v;
        }
        if let Some(v) = patch.eye_closed_frames_threshold {
            self.eye_closed_frames_threshold = v;
        }
        if let Some(v) = patch.blink_rate_threshold {
            self.blink_rate_threshold = v;
        }
        if let Some(v) = patch.mar_threshold {
            self.mar_threshold = v;
        }
        if let Some(v) = patch.yawn_frames_threshold {
            self.yawn_frames_threshold = v;
        }
        if let Some(v) = patch.gaze_deviation_threshold {
            self.gaze_deviation_threshold = v;
        }
        if let Some(v) = patch.head_turn_threshold {
            self.head_turn_threshold = v;
        }
        if let Some(v) = patch.hand_near_face_px {
            self.hand_near_face_px = v;
        }
    }
}

/// Field-wise override of [`DetectionConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfigPatch {
    pub ear_threshold: Option<f32>,
    pub eye_closed_frames_threshold: Option<u32>,
    pub blink_rate_threshold: Option<u32>,
    pub mar_threshold: Option<f32>,
    pub yawn_frames_threshold: Option<u32>,
    pub gaze_deviation_threshold: Option<f32>,
    pub head_turn_threshold: Option<f32>,
    pub hand_near_face_px: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_touches_only_given_fields() {
        let mut config = DetectionConfig::default();
        config.merge(DetectionConfigPatch {
            ear_threshold: Some(0.2),
            yawn_frames_threshold: Some(5),
            ..Default::default()
        });

        assert_eq!(config.ear_threshold, 0.2);
        assert_eq!(config.yawn_frames_threshold, 5);
        assert_eq!(config.eye_closed_frames_threshold, 9);
        assert_eq!(config.hand_near_face_px, 200.0);
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: DetectionConfigPatch =
            serde_json::from_str(r#"{"blink_rate_threshold": 8}"#).unwrap();
        assert_eq!(patch.blink_rate_threshold, Some(8));
        assert!(patch.ear_threshold.is_none());
    }
}
