//! Synchronous alert fan-out

use tracing::{debug, info};

use crate::alert::{Alert, AlertCategory, Severity};
use crate::cooldown::{CooldownConfig, CooldownLedger};

/// Receives every dispatched alert, synchronously, on the frame-processing
/// call. Delivery order across sinks is unspecified.
pub trait AlertSink {
    fn on_alert(&mut self, alert: &Alert);
}

impl<F: FnMut(&Alert)> AlertSink for F {
    fn on_alert(&mut self, alert: &Alert) {
        self(alert)
    }
}

/// Builds alerts, applies cooldown gating, and fans out to subscribers.
pub struct AlertEmitter {
    ledger: CooldownLedger,
    sinks: Vec<Box<dyn AlertSink>>,
}

impl AlertEmitter {
    pub fn new(config: CooldownConfig) -> Self {
        Self {
            ledger: CooldownLedger::new(&config),
            sinks: Vec::new(),
        }
    }

    /// Register a subscriber. There is no unsubscribe; sinks live as long
    /// as the emitter.
    pub fn subscribe(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Build and dispatch one alert, unless its gate is in cooldown.
    ///
    /// Returns the dispatched alert, or `None` when suppressed. Delivery is
    /// at-most-once per call; retry and queueing belong downstream.
    pub fn trigger(
        &mut self,
        category: AlertCategory,
        severity: Severity,
        message: impl Into<String>,
        confidence: f64,
        metadata: Option<serde_json::Value>,
        now_ms: u64,
    ) -> Option<Alert> {
        if !self.ledger.should_fire(category, now_ms) {
            return None;
        }

        let mut alert = Alert::new(category, severity, message, confidence, now_ms);
        if let Some(metadata) = metadata {
            alert = alert.with_metadata(metadata);
        }

        self.ledger.record_fire(category, now_ms);

        info!(
            category = category.as_str(),
            severity = severity.as_str(),
            message = %alert.message,
            "alert dispatched"
        );
        for sink in &mut self.sinks {
            sink.on_alert(&alert);
        }

        Some(alert)
    }

    /// Forget cooldown history (session reset). Subscribers are kept.
    pub fn reset(&mut self) {
        debug!("emitter cooldown history cleared");
        self.ledger.clear();
    }
}
