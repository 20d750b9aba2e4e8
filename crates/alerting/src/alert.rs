//! Alert record and classification enums

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// String representation for logging and downstream consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// Fixed alert category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    EyeClosure,
    BlinkRate,
    Yawning,
    HeadTurn,
    HeadTilt,
    HeadDroop,
    GazeDeviation,
    PhoneUsage,
    HandNearFace,
    Texting,
    Drowsiness,
    Distraction,
}

impl AlertCategory {
    /// String representation for logging and downstream consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EyeClosure => "eye_closure",
            Self::BlinkRate => "blink_rate",
            Self::Yawning => "yawning",
            Self::HeadTurn => "head_turn",
            Self::HeadTilt => "head_tilt",
            Self::HeadDroop => "head_droop",
            Self::GazeDeviation => "gaze_deviation",
            Self::PhoneUsage => "phone_usage",
            Self::HandNearFace => "hand_near_face",
            Self::Texting => "texting",
            Self::Drowsiness => "drowsiness",
            Self::Distraction => "distraction",
        }
    }
}

/// A single dispatched safety alert
///
/// Emitted to subscribers and returned in the per-frame result; the engine
/// itself retains nothing beyond the cooldown bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert id
    pub id: Uuid,
    /// What was detected
    pub category: AlertCategory,
    /// How bad it is
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Frame-clock timestamp (ms) of the triggering frame
    pub timestamp_ms: u64,
    /// Optional category-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Alert {
    /// Build an alert with a fresh id. Confidence is clamped into [0, 1].
    pub fn new(
        category: AlertCategory,
        severity: Severity,
        message: impl Into<String>,
        confidence: f64,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            severity,
            message: message.into(),
            confidence: confidence.clamp(0.0, 1.0),
            timestamp_ms,
            metadata: None,
        }
    }

    /// Attach a metadata payload.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tiers_are_ordered() {
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
    }

    #[test]
    fn confidence_is_clamped() {
        let a = Alert::new(AlertCategory::Yawning, Severity::Moderate, "Yawning", 1.7, 0);
        assert_eq!(a.confidence, 1.0);
        let b = Alert::new(AlertCategory::Yawning, Severity::Moderate, "Yawning", -0.2, 0);
        assert_eq!(b.confidence, 0.0);
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&AlertCategory::HandNearFace).unwrap();
        assert_eq!(json, "\"hand_near_face\"");
    }
}
