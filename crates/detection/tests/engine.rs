//! Whole-frame engine scenarios

use std::cell::RefCell;
use std::rc::Rc;

use alerting::{Alert, AlertCategory, CooldownConfig, GateSpec, Severity};
use detection::{DetectionConfig, DetectionEngine, SignalLevel};
use landmarks::topology::{
    FACE_POINT_COUNT, HAND_POINT_COUNT, LEFT_EYE, LEFT_IRIS, MOUTH, NOSE_TIP, RIGHT_EYE,
    RIGHT_IRIS,
};
use landmarks::{FaceLandmarks, FrameLandmarks, HandLandmarks, Handedness, Point};

const W: u32 = 1000;
const H: u32 = 1000;

/// Build a face with controllable metrics. The frame is square, so one
/// normalized unit maps to the same pixel count on both axes:
/// - eye contours produce exactly `ear` (horizontal span 0.1, vertical
///   opening `ear`/10)
/// - iris rings collapse onto (0.5, `iris_y`)
/// - mouth produces exactly `mar` (width 0.1, opening `mar`/10)
fn face(ear: f32, iris_y: f32, mar: f32, nose: (f32, f32)) -> FaceLandmarks {
    let mut points = vec![Point::default(); FACE_POINT_COUNT];

    for (contour, cx) in [(&LEFT_EYE, 0.35f32), (&RIGHT_EYE, 0.65f32)] {
        let cy = 0.4;
        let dy = ear / 10.0;
        points[contour[0]] = Point::new(cx - 0.05, cy);
        points[contour[3]] = Point::new(cx + 0.05, cy);
        points[contour[1]] = Point::new(cx - 0.02, cy - dy / 2.0);
        points[contour[5]] = Point::new(cx - 0.02, cy + dy / 2.0);
        points[contour[2]] = Point::new(cx + 0.02, cy - dy / 2.0);
        points[contour[4]] = Point::new(cx + 0.02, cy + dy / 2.0);
    }

    for idx in LEFT_IRIS.iter().chain(RIGHT_IRIS.iter()) {
        points[*idx] = Point::new(0.5, iris_y);
    }

    let opening = mar / 10.0;
    points[MOUTH[0]] = Point::new(0.5, 0.8 - opening / 2.0);
    points[MOUTH[1]] = Point::new(0.5, 0.8 + opening / 2.0);
    points[MOUTH[2]] = Point::new(0.45, 0.8);
    points[MOUTH[3]] = Point::new(0.55, 0.8);

    points[NOSE_TIP] = Point::new(nose.0, nose.1);

    FaceLandmarks::from_points(points).unwrap()
}

fn closed_eyes_face() -> FaceLandmarks {
    // EAR 0.10 under the 0.140 threshold, iris centroid in the lower half
    face(0.10, 0.7, 0.0, (0.5, 0.5))
}

fn open_eyes_face() -> FaceLandmarks {
    face(0.30, 0.4, 0.0, (0.5, 0.5))
}

fn frame_at(t_ms: u64, face: FaceLandmarks, hands: Vec<HandLandmarks>) -> FrameLandmarks {
    FrameLandmarks::new(Some(face), hands, W, H, t_ms).unwrap()
}

fn hand_at(x: f32, y: f32) -> HandLandmarks {
    HandLandmarks::from_points(Handedness::Right, vec![Point::new(x, y); HAND_POINT_COUNT]).unwrap()
}

fn no_cooldowns() -> CooldownConfig {
    let mut config = CooldownConfig::default();
    for gate in &mut config.gates {
        gate.cooldown_ms = 0;
    }
    config
}

#[test]
fn frame_without_face_is_neutral() {
    let mut engine = DetectionEngine::default();

    let result = engine.process_frame(&FrameLandmarks::empty(W, H, 0));

    assert!(!result.face_detected);
    assert_eq!(result.avg_ear, 0.0);
    assert_eq!(result.mar, 0.0);
    assert_eq!(result.eye_closure, SignalLevel::None);
    assert_eq!(result.drowsiness, SignalLevel::None);
    assert!(result.alerts.is_empty());
}

#[test]
fn twelve_closed_frames_fire_one_moderate_then_reset_without_blink() {
    let mut engine = DetectionEngine::default();
    let mut dispatched: Vec<Alert> = Vec::new();

    for i in 0..12u64 {
        let result = engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
        dispatched.extend(result.alerts.iter().cloned());

        if i < 9 {
            assert_eq!(result.eye_closure, SignalLevel::None, "frame {}", i + 1);
        } else {
            assert_eq!(result.eye_closure, SignalLevel::Moderate, "frame {}", i + 1);
        }
    }

    // Exactly one dispatch: frame 10; later frames are inside the fatigue cooldown
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].category, AlertCategory::EyeClosure);
    assert_eq!(dispatched[0].severity, Severity::Moderate);
    assert_eq!(dispatched[0].message, "Eyes Closed");

    // No reset on firing: counter sits at 12
    let result = engine.process_frame(&frame_at(12 * 33, open_eyes_face(), Vec::new()));
    // Run of 12 >= threshold 9: reopening is not a blink
    assert_eq!(result.eye_closure_frames, 0);
    assert_eq!(result.blink_count, 0);
}

#[test]
fn counter_is_exact_while_the_run_lasts() {
    let mut engine = DetectionEngine::default();

    for i in 0..12u64 {
        let result = engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
        assert_eq!(result.eye_closure_frames, i as u32 + 1);
    }
}

#[test]
fn short_closure_run_counts_one_blink() {
    let mut engine = DetectionEngine::default();

    for i in 0..5u64 {
        let result = engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
        assert!(result.alerts.is_empty());
    }
    let result = engine.process_frame(&frame_at(5 * 33, open_eyes_face(), Vec::new()));

    assert_eq!(result.blink_count, 1);
    assert_eq!(result.eye_closure_frames, 0);
}

#[test]
fn frequent_blinking_fires_after_the_window() {
    let mut engine = DetectionEngine::default();
    let mut t = 0u64;

    // Five blinks: three closed frames then one open
    for _ in 0..5 {
        for _ in 0..3 {
            engine.process_frame(&frame_at(t, closed_eyes_face(), Vec::new()));
            t += 33;
        }
        engine.process_frame(&frame_at(t, open_eyes_face(), Vec::new()));
        t += 33;
    }

    // Window rolls over past 60 s
    let result = engine.process_frame(&frame_at(61_000, open_eyes_face(), Vec::new()));

    let blink_alerts: Vec<_> = result
        .alerts
        .iter()
        .filter(|a| a.category == AlertCategory::BlinkRate)
        .collect();
    assert_eq!(blink_alerts.len(), 1);
    assert_eq!(blink_alerts[0].severity, Severity::Mild);
    assert_eq!(result.blink_count, 0);
}

#[test]
fn head_and_gaze_are_inert_until_calibration() {
    let mut engine = DetectionEngine::default();
    let offset_face = || face(0.30, 0.4, 0.0, (0.9, 0.9));

    let result = engine.process_frame(&frame_at(0, offset_face(), Vec::new()));
    assert_eq!(result.head_turn, SignalLevel::None);
    assert_eq!(result.head_droop, SignalLevel::None);
    assert_eq!(result.gaze_deviation, SignalLevel::None);
    assert!(result.alerts.is_empty());

    engine.set_calibration(0.5, 0.5, 0.5);
    assert!(engine.is_calibrated());

    let result = engine.process_frame(&frame_at(33, offset_face(), Vec::new()));
    assert_eq!(result.head_turn, SignalLevel::Severe);
    assert_eq!(result.head_droop, SignalLevel::Severe);
    // Iris centroid still matches the calibrated gaze center
    assert_eq!(result.gaze_deviation, SignalLevel::None);
    assert_eq!(result.alerts.len(), 2);
}

#[test]
fn severe_closure_with_yawn_yields_composite_in_the_same_call() {
    let mut engine = DetectionEngine::new(DetectionConfig::default(), no_cooldowns());

    // 30 closed frames, then four with the mouth wide open as well
    for i in 0..30u64 {
        engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
    }
    let mut last = None;
    for i in 30..34u64 {
        let yawning_face = face(0.10, 0.7, 0.9, (0.5, 0.5));
        last = Some(engine.process_frame(&frame_at(i * 33, yawning_face, Vec::new())));
    }

    let result = last.unwrap();
    assert_eq!(result.eye_closure, SignalLevel::Severe);
    assert!(result.yawning);
    assert_eq!(result.drowsiness, SignalLevel::Severe);

    let categories: Vec<_> = result.alerts.iter().map(|a| a.category).collect();
    assert!(categories.contains(&AlertCategory::EyeClosure));
    assert!(categories.contains(&AlertCategory::Yawning));
    assert!(categories.contains(&AlertCategory::Drowsiness));
}

#[test]
fn texting_while_turned_away_is_severe_distraction() {
    let mut engine = DetectionEngine::default();
    engine.set_calibration(0.5, 0.5, 0.5);

    // Head turned (offset 0.15, moderate) with both hands low and close
    let turned = face(0.30, 0.4, 0.0, (0.65, 0.5));
    let hands = vec![hand_at(0.45, 0.95), hand_at(0.6, 0.95)];
    let result = engine.process_frame(&frame_at(0, turned, hands));

    assert_eq!(result.head_turn, SignalLevel::Moderate);
    assert!(result.hands.texting);
    assert_eq!(result.distraction, SignalLevel::Severe);

    let categories: Vec<_> = result.alerts.iter().map(|a| a.category).collect();
    assert!(categories.contains(&AlertCategory::Texting));
    assert!(categories.contains(&AlertCategory::Distraction));
}

#[test]
fn subscribers_see_exactly_the_dispatched_alerts() {
    let mut engine = DetectionEngine::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe(Box::new(move |alert: &Alert| {
        sink.borrow_mut().push(alert.clone());
    }));

    let mut returned = Vec::new();
    for i in 0..12u64 {
        let result = engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
        returned.extend(result.alerts.iter().map(|a| a.id));
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(returned, seen.iter().map(|a| a.id).collect::<Vec<_>>());
}

#[test]
fn reset_restarts_the_session() {
    let mut engine = DetectionEngine::default();
    engine.set_calibration(0.5, 0.5, 0.5);

    for i in 0..12u64 {
        engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
    }

    engine.reset();
    assert!(!engine.is_calibrated());

    // Counter restarts from zero and the fatigue gate reopens
    let result = engine.process_frame(&frame_at(10_000, closed_eyes_face(), Vec::new()));
    assert_eq!(result.eye_closure_frames, 1);
    assert_eq!(result.eye_closure, SignalLevel::None);
}

#[test]
fn merged_config_applies_from_the_next_frame() {
    let mut engine = DetectionEngine::default();

    engine.merge_config(detection::DetectionConfigPatch {
        eye_closed_frames_threshold: Some(3),
        ..Default::default()
    });

    let mut first_alert_frame = None;
    for i in 0..6u64 {
        let result = engine.process_frame(&frame_at(i * 33, closed_eyes_face(), Vec::new()));
        if !result.alerts.is_empty() && first_alert_frame.is_none() {
            first_alert_frame = Some(i + 1);
        }
    }

    // Threshold 3: the counter crosses it on frame 4
    assert_eq!(first_alert_frame, Some(4));
}

#[test]
fn gate_spec_can_re_gate_a_category() {
    // Deployments can gate gaze deviation like any other mechanism
    let mut config = no_cooldowns();
    config.gates.push(GateSpec {
        categories: vec![AlertCategory::GazeDeviation],
        cooldown_ms: 10_000,
    });
    let mut engine = DetectionEngine::new(DetectionConfig::default(), config);
    engine.set_calibration(0.2, 0.5, 0.5);

    // Iris centroid sits at x 0.5, calibrated center 0.2: offset 0.3
    let mut total = 0;
    for i in 0..5u64 {
        let result = engine.process_frame(&frame_at(i * 33, open_eyes_face(), Vec::new()));
        assert_eq!(result.gaze_deviation, SignalLevel::Severe);
        total += result
            .alerts
            .iter()
            .filter(|a| a.category == AlertCategory::GazeDeviation)
            .count();
    }
    assert_eq!(total, 1);
}
