//! Low oil pressure under load
//!
//! Evaluated on its own slow tick against the shared, unclamped snapshot.
//! While the condition holds every tick flips the inverted-colour flag, which
//! makes the whole screen blink; otherwise the flag is held off.

use portable_atomic::{AtomicBool, Ordering};

use crate::config::OilAlarmConfig;
use crate::state::SecondaryMetric;
use crate::telemetry::TelemetrySnapshot;
use candash_protocol::Signal;

/// Whether the alarm condition holds for the given readings
pub fn oil_alarm_active(rpm: i32, oil_pressure: i32, config: &OilAlarmConfig) -> bool {
    rpm >= config.min_rpm && oil_pressure < config.min_pressure
}

/// Blink state of the oil pressure alarm
///
/// [`tick`](Self::tick) must only be called from one task; any task may
/// read the flag.
#[derive(Debug, Default)]
pub struct OilPressureAlarm {
    inverted: AtomicBool,
}

impl OilPressureAlarm {
    pub const fn new() -> Self {
        Self {
            inverted: AtomicBool::new(false),
        }
    }

    /// Re-evaluate the alarm and return the new flag
    ///
    /// The oil pressure channel checked is the one the driver is looking at.
    pub fn tick(
        &self,
        snapshot: &TelemetrySnapshot,
        metric: SecondaryMetric,
        config: &OilAlarmConfig,
    ) -> bool {
        let rpm = snapshot.load(Signal::Rpm);
        let pressure = snapshot.load(metric.oil_pressure_signal());

        let inverted = oil_alarm_active(rpm, pressure, config) && !self.is_inverted();
        self.inverted.store(inverted, Ordering::Relaxed);
        inverted
    }

    /// Whether the screen should currently be drawn inverted
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted.load(Ordering::Relaxed)
    }
}
