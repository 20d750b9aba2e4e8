//! Per-mechanism cooldown gates
//!
//! Cooldown is not uniform across categories: eye closure and yawning share
//! one gate, phone use / distraction / drowsiness each get their own, and
//! the remaining categories are deliberately ungated (head pose, gaze, and
//! hand proximity re-fire every qualifying frame). The gate map is data,
//! so deployments can re-gate categories without touching the engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alert::AlertCategory;

/// One cooldown gate shared by a set of categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSpec {
    /// Categories dispatching through this gate.
    pub categories: Vec<AlertCategory>,
    /// Minimum interval between dispatches (ms).
    pub cooldown_ms: u64,
}

/// Cooldown gate configuration. Categories not covered by any gate are
/// never suppressed at this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    pub gates: Vec<GateSpec>,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            gates: vec![
                // Fatigue signals share one gate: a yawn right after an
                // eye-closure alert adds nothing.
                GateSpec {
                    categories: vec![AlertCategory::EyeClosure, AlertCategory::Yawning],
                    cooldown_ms: 3_000,
                },
                GateSpec {
                    categories: vec![AlertCategory::PhoneUsage],
                    cooldown_ms: 5_000,
                },
                GateSpec {
                    categories: vec![AlertCategory::Distraction],
                    cooldown_ms: 5_000,
                },
                GateSpec {
                    categories: vec![AlertCategory::Drowsiness],
                    cooldown_ms: 5_000,
                },
            ],
        }
    }
}

/// Runtime cooldown bookkeeping over the frame clock.
#[derive(Debug)]
pub struct CooldownLedger {
    /// Gate index per gated category.
    gate_of: HashMap<AlertCategory, usize>,
    /// Cooldown interval per gate.
    cooldown_ms: Vec<u64>,
    /// Last dispatch time per gate (frame clock).
    last_fired_ms: Vec<Option<u64>>,
}

impl CooldownLedger {
    pub fn new(config: &CooldownConfig) -> Self {
        let mut gate_of = HashMap::new();
        let mut cooldown_ms = Vec::with_capacity(config.gates.len());
        for (idx, gate) in config.gates.iter().enumerate() {
            for &category in &gate.categories {
                gate_of.insert(category, idx);
            }
            cooldown_ms.push(gate.cooldown_ms);
        }
        let last_fired_ms = vec![None; config.gates.len()];
        Self {
            gate_of,
            cooldown_ms,
            last_fired_ms,
        }
    }

    /// Whether a dispatch for `category` is allowed at `now_ms`.
    /// Ungated categories always pass.
    pub fn should_fire(&self, category: AlertCategory, now_ms: u64) -> bool {
        let Some(&gate) = self.gate_of.get(&category) else {
            return true;
        };
        match self.last_fired_ms[gate] {
            Some(last) if now_ms.saturating_sub(last) < self.cooldown_ms[gate] => {
                debug!(
                    category = category.as_str(),
                    elapsed_ms = now_ms.saturating_sub(last),
                    "alert suppressed by cooldown"
                );
                false
            }
            _ => true,
        }
    }

    /// Record a dispatch for `category`. No-op for ungated categories.
    pub fn record_fire(&mut self, category: AlertCategory, now_ms: u64) {
        if let Some(&gate) = self.gate_of.get(&category) {
            self.last_fired_ms[gate] = Some(now_ms);
        }
    }

    /// Forget all dispatch history (session reset).
    pub fn clear(&mut self) {
        for slot in &mut self.last_fired_ms {
            *slot = None;
        }
    }
}
