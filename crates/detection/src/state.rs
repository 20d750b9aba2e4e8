//! Per-session engine state

/// Calibrated neutral gaze/head reference, one overwritable snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Neutral iris-centroid x, normalized.
    pub gaze_center_x: f32,
    /// Neutral nose-tip x, normalized.
    pub head_center_x: f32,
    /// Neutral nose-tip y, normalized.
    pub head_center_y: f32,
}

/// Fixed-capacity sliding window of recent MAR samples.
///
/// Retained for downstream smoothing; the yawn decision itself works off
/// the raw per-frame MAR.
#[derive(Debug, Clone)]
pub struct MarWindow {
    data: std::collections::VecDeque<f32>,
    capacity: usize,
}

impl MarWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: std::collections::VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, mar: f32) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(mar);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// MAR samples kept per session.
pub const MAR_WINDOW_CAPACITY: usize = 30;

/// Mutable per-session state, threaded through every frame.
///
/// One instance per monitoring session; the engine owns it and clears it on
/// `reset()`. All counters stay ≥ 0 by construction.
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Consecutive frames the eyes have read as closed.
    pub eye_closure_frames: u32,
    /// Blinks counted in the current accounting window.
    pub blink_count: u32,
    /// Start of the current blink window (frame clock); set on the first
    /// face frame of a session.
    pub blink_window_start_ms: Option<u64>,
    /// Accumulated yawn frames (no decay between yawns).
    pub yawn_frames: u32,
    /// Recent MAR samples.
    pub mar_window: MarWindow,
    /// Gaze/head reference; head-pose and gaze checks are inert while unset.
    pub calibration: Option<Calibration>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            eye_closure_frames: 0,
            blink_count: 0,
            blink_window_start_ms: None,
            yawn_frames: 0,
            mar_window: MarWindow::new(MAR_WINDOW_CAPACITY),
            calibration: None,
        }
    }
}

impl EngineState {
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    /// Clear everything back to session start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mar_window_caps_at_capacity() {
        let mut window = MarWindow::new(30);
        for i in 0..100 {
            window.push(i as f32 / 100.0);
        }
        assert_eq!(window.len(), 30);
        // Oldest samples dropped first
        assert!((window.iter().next().unwrap() - 0.70).abs() < 1e-6);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut state = EngineState {
            eye_closure_frames: 12,
            blink_count: 3,
            blink_window_start_ms: Some(5_000),
            yawn_frames: 2,
            calibration: Some(Calibration {
                gaze_center_x: 0.5,
                head_center_x: 0.5,
                head_center_y: 0.5,
            }),
            ..Default::default()
        };
        state.mar_window.push(0.4);

        state.reset();

        assert_eq!(state.eye_closure_frames, 0);
        assert_eq!(state.blink_count, 0);
        assert!(state.blink_window_start_ms.is_none());
        assert_eq!(state.yawn_frames, 0);
        assert!(state.mar_window.is_empty());
        assert!(!state.is_calibrated());
    }
}
