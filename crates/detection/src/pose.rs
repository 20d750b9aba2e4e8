//! Head-pose and gaze classifiers
//!
//! Both are calibration-relative and stateless: offsets are measured
//! against the session's calibrated neutral position and re-evaluated from
//! scratch every frame. No cooldown applies at this layer.

use alerting::{AlertCategory, Severity};
use serde_json::json;

use crate::analysis::SignalLevel;
use crate::classifiers::DebouncePolicy;
use crate::config::DetectionConfig;
use crate::emit::FrameEmitter;
use crate::state::Calibration;

pub const HEAD_POSE_POLICY: DebouncePolicy = DebouncePolicy::EveryFrame;
pub const GAZE_POLICY: DebouncePolicy = DebouncePolicy::EveryFrame;

/// Tier boundaries on the horizontal nose-tip offset.
const TURN_MODERATE_AT: f32 = 0.1;
const TURN_SEVERE_AT: f32 = 0.2;

/// Tier boundaries on the upward vertical offset.
const TILT_MODERATE_AT: f32 = 0.08;
const TILT_SEVERE_AT: f32 = 0.15;

/// Tier boundaries on the downward vertical offset.
const DROOP_MODERATE_AT: f32 = 0.07;
const DROOP_SEVERE_AT: f32 = 0.12;

/// Tier boundaries on the gaze offset.
const GAZE_MODERATE_AT: f32 = 0.1;
const GAZE_SEVERE_AT: f32 = 0.2;

/// Head-pose levels for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadPoseLevels {
    pub turn: SignalLevel,
    pub tilt: SignalLevel,
    pub droop: SignalLevel,
}

fn tier(offset: f32, moderate_at: f32, severe_at: f32) -> SignalLevel {
    if offset < moderate_at {
        SignalLevel::Mild
    } else if offset < severe_at {
        SignalLevel::Moderate
    } else {
        SignalLevel::Severe
    }
}

/// Classify nose-tip deviation from the calibrated head center.
///
/// Horizontal offsets tier as head turn. Vertical offsets split by
/// direction: above center is looking upward (head tilt), below center is
/// drooping, with its own tighter tier boundaries.
pub fn classify_head_pose(
    config: &DetectionConfig,
    calibration: &Calibration,
    emitter: &mut FrameEmitter<'_>,
    nose_x: f32,
    nose_y: f32,
) -> HeadPoseLevels {
    let mut levels = HeadPoseLevels::default();

    let x_offset = (nose_x - calibration.head_center_x).abs();
    if x_offset > config.head_turn_threshold {
        let level = tier(x_offset, TURN_MODERATE_AT, TURN_SEVERE_AT);
        let message = match level {
            SignalLevel::Mild => "Mild Head Turn",
            SignalLevel::Moderate => "Moderate Head Turn",
            _ => "Severe Head Turn",
        };
        emitter.trigger(
            AlertCategory::HeadTurn,
            level.severity().unwrap_or(Severity::Mild),
            message,
            confidence_for(level),
            Some(json!({ "offset": x_offset })),
        );
        levels.turn = level;
    }

    let y_offset = (nose_y - calibration.head_center_y).abs();
    if y_offset > config.head_turn_threshold {
        if nose_y < calibration.head_center_y {
            let level = tier(y_offset, TILT_MODERATE_AT, TILT_SEVERE_AT);
            let message = match level {
                SignalLevel::Mild => "Mild Looking Upward",
                SignalLevel::Moderate => "Moderate Looking Upward",
                _ => "Severe Looking Upward",
            };
            emitter.trigger(
                AlertCategory::HeadTilt,
                level.severity().unwrap_or(Severity::Mild),
                message,
                confidence_for(level),
                Some(json!({ "offset": y_offset })),
            );
            levels.tilt = level;
        } else {
            let level = tier(y_offset, DROOP_MODERATE_AT, DROOP_SEVERE_AT);
            let message = match level {
                SignalLevel::Mild => "Head drooping symptom",
                SignalLevel::Moderate => "Head drooping started",
                _ => "Head drooped",
            };
            emitter.trigger(
                AlertCategory::HeadDroop,
                level.severity().unwrap_or(Severity::Mild),
                message,
                confidence_for(level),
                Some(json!({ "offset": y_offset })),
            );
            levels.droop = level;
        }
    }

    levels
}

/// Classify iris-centroid deviation from the calibrated gaze center.
pub fn classify_gaze(
    config: &DetectionConfig,
    calibration: &Calibration,
    emitter: &mut FrameEmitter<'_>,
    gaze_x_norm: f32,
) -> SignalLevel {
    let offset = (gaze_x_norm - calibration.gaze_center_x).abs();
    if offset <= config.gaze_deviation_threshold {
        return SignalLevel::None;
    }

    let level = tier(offset, GAZE_MODERATE_AT, GAZE_SEVERE_AT);
    let message = match level {
        SignalLevel::Mild => "Mild Gaze Deviation",
        SignalLevel::Moderate => "Moderate Gaze Deviation",
        _ => "Severe Gaze Deviation",
    };
    emitter.trigger(
        AlertCategory::GazeDeviation,
        level.severity().unwrap_or(Severity::Mild),
        message,
        confidence_for(level),
        Some(json!({ "offset": offset })),
    );
    level
}

fn confidence_for(level: SignalLevel) -> f64 {
    match level {
        SignalLevel::None => 0.0,
        SignalLevel::Mild => 0.6,
        SignalLevel::Moderate => 0.75,
        SignalLevel::Severe => 0.9,
    }
}
