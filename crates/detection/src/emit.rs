//! Per-frame emission context

use alerting::{Alert, AlertCategory, AlertEmitter, Severity};

/// Wraps the session emitter for the duration of one frame: stamps every
/// trigger with the frame clock and collects what actually went out.
pub(crate) struct FrameEmitter<'a> {
    emitter: &'a mut AlertEmitter,
    now_ms: u64,
    dispatched: Vec<Alert>,
}

impl<'a> FrameEmitter<'a> {
    pub fn new(emitter: &'a mut AlertEmitter, now_ms: u64) -> Self {
        Self {
            emitter,
            now_ms,
            dispatched: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Attempt a dispatch; cooldown suppression is silent here.
    pub fn trigger(
        &mut self,
        category: AlertCategory,
        severity: Severity,
        message: &str,
        confidence: f64,
        metadata: Option<serde_json::Value>,
    ) {
        if let Some(alert) =
            self.emitter
                .trigger(category, severity, message, confidence, metadata, self.now_ms)
        {
            self.dispatched.push(alert);
        }
    }

    /// Alerts dispatched through this context.
    pub fn into_dispatched(self) -> Vec<Alert> {
        self.dispatched
    }

    #[cfg(test)]
    pub fn dispatched(&self) -> &[Alert] {
        &self.dispatched
    }
}
