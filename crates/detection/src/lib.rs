//! Driver-State Detection Engine
//!
//! Converts per-frame landmark streams into temporally filtered,
//! severity-tiered safety alerts:
//! - Eye closure, blink rate, and yawning (fatigue signals)
//! - Head pose and gaze deviation (calibration-relative)
//! - Hand near ear/face and texting posture
//! - Composite drowsiness / distraction assessment
//!
//! One engine per monitoring session. `process_frame` is synchronous and
//! performs no I/O; callers serialize invocations per session.

pub mod analysis;
pub mod classifiers;
pub mod composite;
pub mod config;
mod emit;
pub mod hands;
pub mod pose;
pub mod state;

pub use analysis::{DetectionResult, HandFlags, SignalLevel};
pub use classifiers::DebouncePolicy;
pub use config::{DetectionConfig, DetectionConfigPatch};
pub use state::{Calibration, EngineState};

use alerting::{AlertEmitter, AlertSink, CooldownConfig};
use landmarks::topology::{LEFT_EYE, LEFT_IRIS, NOSE_TIP, RIGHT_EYE, RIGHT_IRIS};
use landmarks::FrameLandmarks;
use tracing::{debug, info};

use crate::emit::FrameEmitter;

/// Per-session driver-state engine
pub struct DetectionEngine {
    config: DetectionConfig,
    state: EngineState,
    emitter: AlertEmitter,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(DetectionConfig::default(), CooldownConfig::default())
    }
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig, cooldowns: CooldownConfig) -> Self {
        Self {
            config,
            state: EngineState::default(),
            emitter: AlertEmitter::new(cooldowns),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn is_calibrated(&self) -> bool {
        self.state.is_calibrated()
    }

    /// Register an alert subscriber; delivery is synchronous per frame.
    pub fn subscribe(&mut self, sink: Box<dyn AlertSink>) {
        self.emitter.subscribe(sink);
    }

    /// Replace the threshold set wholesale, effective next frame.
    pub fn set_config(&mut self, config: DetectionConfig) {
        debug!(?config, "detection config replaced");
        self.config = config;
    }

    /// Merge a partial threshold update, effective next frame.
    pub fn merge_config(&mut self, patch: DetectionConfigPatch) {
        self.config.merge(patch);
        debug!(config = ?self.config, "detection config merged");
    }

    /// Capture the neutral gaze/head reference. Overwrites any previous
    /// snapshot; until the first call, head-pose and gaze checks are inert.
    pub fn set_calibration(&mut self, gaze_center_x: f32, head_center_x: f32, head_center_y: f32) {
        info!(
            gaze_center_x,
            head_center_x, head_center_y, "calibration captured"
        );
        self.state.calibration = Some(Calibration {
            gaze_center_x,
            head_center_x,
            head_center_y,
        });
    }

    /// Clear all per-session state: counters, windows, calibration, and
    /// cooldown history. Subscribers and thresholds are kept.
    pub fn reset(&mut self) {
        info!("engine state reset");
        self.state.reset();
        self.emitter.reset();
    }

    /// Process one frame of landmarks and return the detection snapshot.
    ///
    /// A frame without a face is a normal condition: metrics come back
    /// neutral, every level reads `None`, and nothing is dispatched.
    pub fn process_frame(&mut self, frame: &FrameLandmarks) -> DetectionResult {
        let Some(face) = frame.face.as_ref() else {
            return DetectionResult {
                face_detected: false,
                blink_count: self.state.blink_count,
                ..Default::default()
            };
        };

        let mut emitter = FrameEmitter::new(&mut self.emitter, frame.timestamp_ms);
        let (w, h) = (frame.width, frame.height);

        // Fatigue signals
        let left_ear = geometry::aspect_ratio(face, &LEFT_EYE, w, h);
        let right_ear = geometry::aspect_ratio(face, &RIGHT_EYE, w, h);
        let avg_ear = (left_ear + right_ear) / 2.0;

        let left_iris = geometry::iris_center(face, &LEFT_IRIS, w, h);
        let right_iris = geometry::iris_center(face, &RIGHT_IRIS, w, h);
        let iris_center = (
            (left_iris.0 + right_iris.0) / 2.0,
            (left_iris.1 + right_iris.1) / 2.0,
        );
        let iris_hidden = iris_center.1 / h as f32 > 0.5;

        let eye_closure = classifiers::classify_eye_closure(
            &self.config,
            &mut self.state,
            &mut emitter,
            avg_ear,
            iris_hidden,
        );
        classifiers::classify_blink_rate(&self.config, &mut self.state, &mut emitter);

        let mar = geometry::mouth_aspect_ratio(face, w, h);
        let yawning = classifiers::classify_yawn(&self.config, &mut self.state, &mut emitter, mar);

        // Calibration-relative signals
        let nose = face.point(NOSE_TIP);
        let gaze_x_norm = iris_center.0 / w as f32;
        let (pose_levels, gaze_deviation) = match self.state.calibration {
            Some(calibration) => (
                pose::classify_head_pose(&self.config, &calibration, &mut emitter, nose.x, nose.y),
                pose::classify_gaze(&self.config, &calibration, &mut emitter, gaze_x_norm),
            ),
            None => (pose::HeadPoseLevels::default(), SignalLevel::None),
        };

        // Hand activity
        let face_center_px = nose.to_pixels(w, h);
        let hand_flags = hands::classify_hands(
            &self.config,
            &mut emitter,
            face,
            face_center_px,
            &frame.hands,
            w,
            h,
        );

        // Composites, from this frame's outputs only
        let drowsiness =
            composite::assess_drowsiness(&mut emitter, eye_closure, pose_levels.droop, yawning);
        let distraction = composite::assess_distraction(&mut emitter, pose_levels, hand_flags);

        DetectionResult {
            face_detected: true,
            avg_ear,
            mar,
            eye_closure,
            eye_closure_frames: self.state.eye_closure_frames,
            blink_count: self.state.blink_count,
            yawning,
            head_turn: pose_levels.turn,
            head_tilt: pose_levels.tilt,
            head_droop: pose_levels.droop,
            gaze_deviation,
            hands: hand_flags,
            drowsiness,
            distraction,
            alerts: emitter.into_dispatched(),
        }
    }
}
