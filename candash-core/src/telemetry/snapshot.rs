//! Shared latest-value store
//!
//! Every field is its own atomic word. The producer stores fields one at a
//! time with no lock; the consumer loads them one at a time. Relaxed ordering
//! is enough because no field guards another: a reader may see a new rpm
//! next to an old oil pressure, but never half of either.

use portable_atomic::{AtomicI32, Ordering};

use candash_protocol::{Signal, SignalUpdate};

use super::values::TelemetryValues;

/// Latest decoded value of every signal
#[derive(Debug)]
pub struct TelemetrySnapshot {
    rpm: AtomicI32,
    oil_pressure_primary: AtomicI32,
    oil_pressure_secondary: AtomicI32,
    oil_temp: AtomicI32,
    engine_coolant_temp: AtomicI32,
    throttle_percent: AtomicI32,
    brake_percent: AtomicI32,
    steering_angle: AtomicI32,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySnapshot {
    /// All fields zero
    pub const fn new() -> Self {
        Self {
            rpm: AtomicI32::new(0),
            oil_pressure_primary: AtomicI32::new(0),
            oil_pressure_secondary: AtomicI32::new(0),
            oil_temp: AtomicI32::new(0),
            engine_coolant_temp: AtomicI32::new(0),
            throttle_percent: AtomicI32::new(0),
            brake_percent: AtomicI32::new(0),
            steering_angle: AtomicI32::new(0),
        }
    }

    fn field(&self, signal: Signal) -> &AtomicI32 {
        match signal {
            Signal::Rpm => &self.rpm,
            Signal::OilPressurePrimary => &self.oil_pressure_primary,
            Signal::OilPressureSecondary => &self.oil_pressure_secondary,
            Signal::OilTemp => &self.oil_temp,
            Signal::EngineCoolantTemp => &self.engine_coolant_temp,
            Signal::ThrottlePercent => &self.throttle_percent,
            Signal::BrakePercent => &self.brake_percent,
            Signal::SteeringAngle => &self.steering_angle,
        }
    }

    /// Store one field
    #[inline]
    pub fn store(&self, signal: Signal, value: i32) {
        self.field(signal).store(value, Ordering::Relaxed);
    }

    /// Load one field
    #[inline]
    pub fn load(&self, signal: Signal) -> i32 {
        self.field(signal).load(Ordering::Relaxed)
    }

    /// Store one decoded update
    #[inline]
    pub fn apply(&self, update: &SignalUpdate) {
        self.store(update.signal, update.value);
    }

    /// Field-by-field copy for the consumer
    ///
    /// Each field is read atomically; the copy as a whole is not a single
    /// point in time.
    pub fn copy(&self) -> TelemetryValues {
        let mut values = TelemetryValues::default();
        for signal in Signal::ALL {
            values.set(signal, self.load(signal));
        }
        values
    }
}
