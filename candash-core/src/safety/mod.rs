//! Driver warnings
//!
//! Decides when a reading deserves the driver's attention. Drawing the
//! warning is the renderer's job.

pub mod oil_alarm;
pub mod severity;

pub use oil_alarm::{oil_alarm_active, OilPressureAlarm};
pub use severity::{Severity, Severities};
