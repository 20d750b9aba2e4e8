//! Fatigue classifiers: eye closure, blink rate, yawn
//!
//! Debounce strategy differs per signal and the divergence is intentional:
//! eye closure and yawn accumulate frame counters, blink rate settles over
//! a wall-clock window, and the pose/gaze/hand signals elsewhere re-fire
//! every frame. Each classifier names its policy so the strategies stay
//! distinct instead of converging by accident.

use alerting::{AlertCategory, Severity};
use serde_json::json;

use crate::analysis::SignalLevel;
use crate::config::DetectionConfig;
use crate::emit::FrameEmitter;
use crate::state::EngineState;

/// How a signal turns per-frame booleans into alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePolicy {
    /// Counter accumulates over consecutive qualifying frames.
    Counter,
    /// Re-evaluated from scratch every frame; cooldown is the only damper.
    EveryFrame,
    /// Accumulates over a wall-clock window, fires at window end.
    Windowed,
}

pub const EYE_CLOSURE_POLICY: DebouncePolicy = DebouncePolicy::Counter;
pub const BLINK_RATE_POLICY: DebouncePolicy = DebouncePolicy::Windowed;
pub const YAWN_POLICY: DebouncePolicy = DebouncePolicy::Counter;

/// Closed-frame count beyond which eye closure tiers severe.
const EYE_CLOSED_SEVERE_FRAMES: u32 = 30;

/// A just-ended closure run of at least this many frames counts as a blink.
const BLINK_MIN_FRAMES: u32 = 2;

/// Blink accounting window.
const BLINK_WINDOW_MS: u64 = 60_000;

/// Eye-closure classifier.
///
/// The eyes read closed when the average EAR is under threshold AND the
/// iris centroid sits in the lower half of the frame. The counter is never
/// reset by an alert firing; only reopening clears it, so re-fires are
/// throttled by the fatigue cooldown alone. A short run that ends counts
/// as one blink.
pub fn classify_eye_closure(
    config: &DetectionConfig,
    state: &mut EngineState,
    emitter: &mut FrameEmitter<'_>,
    avg_ear: f32,
    iris_hidden: bool,
) -> SignalLevel {
    let closed = avg_ear < config.ear_threshold && iris_hidden;

    if closed {
        state.eye_closure_frames += 1;

        if state.eye_closure_frames > EYE_CLOSED_SEVERE_FRAMES {
            emitter.trigger(
                AlertCategory::EyeClosure,
                Severity::Severe,
                "Eyes Closed Too Long",
                0.9,
                Some(json!({ "frames": state.eye_closure_frames })),
            );
            SignalLevel::Severe
        } else if state.eye_closure_frames > config.eye_closed_frames_threshold {
            emitter.trigger(
                AlertCategory::EyeClosure,
                Severity::Moderate,
                "Eyes Closed",
                0.75,
                Some(json!({ "frames": state.eye_closure_frames })),
            );
            SignalLevel::Moderate
        } else {
            SignalLevel::None
        }
    } else {
        if (BLINK_MIN_FRAMES..config.eye_closed_frames_threshold).contains(&state.eye_closure_frames)
        {
            state.blink_count += 1;
        }
        state.eye_closure_frames = 0;
        SignalLevel::None
    }
}

/// Blink-rate classifier.
///
/// Every 60 s of frame-clock time, fires when the accumulated blink count
/// reaches threshold; count and window reset either way.
pub fn classify_blink_rate(
    config: &DetectionConfig,
    state: &mut EngineState,
    emitter: &mut FrameEmitter<'_>,
) {
    let now_ms = emitter.now_ms();
    let start = *state.blink_window_start_ms.get_or_insert(now_ms);

    if now_ms.saturating_sub(start) > BLINK_WINDOW_MS {
        if state.blink_count >= config.blink_rate_threshold {
            emitter.trigger(
                AlertCategory::BlinkRate,
                Severity::Mild,
                "High Blinking Rate",
                0.6,
                Some(json!({ "blinks": state.blink_count })),
            );
        }
        state.blink_count = 0;
        state.blink_window_start_ms = Some(now_ms);
    }
}

/// Yawn classifier.
///
/// The counter grows on every high-MAR frame and never decays on quiet
/// frames; crossing the threshold fires and resets it unconditionally, so
/// one long yawn can fire twice with only the fatigue cooldown in between.
/// Returns whether a yawn fired this frame.
pub fn classify_yawn(
    config: &DetectionConfig,
    state: &mut EngineState,
    emitter: &mut FrameEmitter<'_>,
    mar: f32,
) -> bool {
    state.mar_window.push(mar);

    if mar > config.mar_threshold {
        state.yawn_frames += 1;
    }

    if state.yawn_frames > config.yawn_frames_threshold {
        emitter.trigger(
            AlertCategory::Yawning,
            Severity::Moderate,
            "Yawning",
            0.7,
            Some(json!({ "mar": mar })),
        );
        state.yawn_frames = 0;
        return true;
    }

    false
}
