//! Landmark Replay - Offline Analysis Entry Point
//!
//! Feeds recorded landmark frames (one JSON record per line) through the
//! detection engine and logs every dispatched alert plus a session summary.
//!
//! Usage: replay <frames.jsonl> [detect-config] [--calibrate-first-frame]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use alerting::{Alert, CooldownConfig};
use detection::{DetectionConfig, DetectionConfigPatch, DetectionEngine};
use landmarks::topology::{LEFT_IRIS, NOSE_TIP, RIGHT_IRIS};
use landmarks::FrameLandmarks;
use tracing::{info, Level};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

struct Args {
    frames: PathBuf,
    config: Option<String>,
    calibrate_first_frame: bool,
}

fn parse_args() -> Result<Args> {
    let mut frames = None;
    let mut config = None;
    let mut calibrate_first_frame = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--calibrate-first-frame" => calibrate_first_frame = true,
            _ if frames.is_none() => frames = Some(PathBuf::from(arg)),
            _ if config.is_none() => config = Some(arg),
            _ => bail!("unexpected argument: {}", arg),
        }
    }

    let Some(frames) = frames else {
        bail!("usage: replay <frames.jsonl> [detect-config] [--calibrate-first-frame]");
    };

    Ok(Args {
        frames,
        config,
        calibrate_first_frame,
    })
}

/// Layer detection thresholds: defaults, then an optional config file,
/// then DETECT_* environment overrides.
fn load_config(path: Option<&str>) -> Result<DetectionConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    let settings = builder
        .add_source(config::Environment::with_prefix("DETECT").try_parsing(true))
        .build()
        .context("building detection settings")?;

    let patch: DetectionConfigPatch = settings
        .try_deserialize()
        .context("reading detection thresholds")?;

    let mut detection = DetectionConfig::default();
    detection.merge(patch);
    Ok(detection)
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args()?;
    let detection = load_config(args.config.as_deref())?;

    info!("=== Landmark Replay v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        topology = landmarks::topology::VERSION,
        ?detection,
        "detection thresholds"
    );

    let mut engine = DetectionEngine::new(detection, CooldownConfig::default());

    let totals = Rc::new(RefCell::new(BTreeMap::<&'static str, usize>::new()));
    let sink_totals = Rc::clone(&totals);
    engine.subscribe(Box::new(move |alert: &Alert| {
        *sink_totals
            .borrow_mut()
            .entry(alert.category.as_str())
            .or_insert(0) += 1;
    }));

    let file = File::open(&args.frames)
        .with_context(|| format!("opening {}", args.frames.display()))?;

    let mut frames = 0usize;
    let mut face_frames = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.context("reading frame record")?;
        if line.trim().is_empty() {
            continue;
        }

        // A record that does not parse is a broken capture, not a
        // recoverable frame
        let frame: FrameLandmarks = serde_json::from_str(&line)
            .with_context(|| format!("frame record at line {}", line_no + 1))?;

        if args.calibrate_first_frame && !engine.is_calibrated() {
            if let Some(face) = frame.face.as_ref() {
                let left = geometry::iris_center(face, &LEFT_IRIS, frame.width, frame.height);
                let right = geometry::iris_center(face, &RIGHT_IRIS, frame.width, frame.height);
                let gaze_x = ((left.0 + right.0) / 2.0) / frame.width as f32;
                let nose = face.point(NOSE_TIP);
                engine.set_calibration(gaze_x, nose.x, nose.y);
            }
        }

        let result = engine.process_frame(&frame);
        frames += 1;
        if result.face_detected {
            face_frames += 1;
        }
    }

    info!(frames, face_frames, "replay finished");
    for (category, count) in totals.borrow().iter() {
        info!(category = *category, count = *count, "alerts dispatched");
    }

    Ok(())
}
