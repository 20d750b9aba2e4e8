//! Alerting System
//!
//! Alert records, per-mechanism cooldown gating, and synchronous fan-out
//! to registered subscribers. Timekeeping is the caller's frame clock
//! (milliseconds), so gating behavior is deterministic under test.

mod alert;
mod cooldown;
mod emitter;

pub use alert::{Alert, AlertCategory, Severity};
pub use cooldown::{CooldownConfig, CooldownLedger, GateSpec};
pub use emitter::{AlertEmitter, AlertSink};
