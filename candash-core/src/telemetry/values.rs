//! Plain-value copy of the telemetry snapshot

use candash_protocol::Signal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ClampLimits;

/// One consumer-owned copy of every telemetry field
///
/// Produced by [`TelemetrySnapshot::copy`](super::TelemetrySnapshot::copy).
/// Clamping only ever happens on this copy, never on the shared snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryValues {
    pub rpm: i32,
    pub oil_pressure_primary: i32,
    pub oil_pressure_secondary: i32,
    pub oil_temp: i32,
    pub engine_coolant_temp: i32,
    pub throttle_percent: i32,
    pub brake_percent: i32,
    pub steering_angle: i32,
}

impl TelemetryValues {
    /// Read one field by signal
    pub fn get(&self, signal: Signal) -> i32 {
        match signal {
            Signal::Rpm => self.rpm,
            Signal::OilPressurePrimary => self.oil_pressure_primary,
            Signal::OilPressureSecondary => self.oil_pressure_secondary,
            Signal::OilTemp => self.oil_temp,
            Signal::EngineCoolantTemp => self.engine_coolant_temp,
            Signal::ThrottlePercent => self.throttle_percent,
            Signal::BrakePercent => self.brake_percent,
            Signal::SteeringAngle => self.steering_angle,
        }
    }

    /// Overwrite one field by signal
    pub fn set(&mut self, signal: Signal, value: i32) {
        let field = match signal {
            Signal::Rpm => &mut self.rpm,
            Signal::OilPressurePrimary => &mut self.oil_pressure_primary,
            Signal::OilPressureSecondary => &mut self.oil_pressure_secondary,
            Signal::OilTemp => &mut self.oil_temp,
            Signal::EngineCoolantTemp => &mut self.engine_coolant_temp,
            Signal::ThrottlePercent => &mut self.throttle_percent,
            Signal::BrakePercent => &mut self.brake_percent,
            Signal::SteeringAngle => &mut self.steering_angle,
        };
        *field = value;
    }

    /// Saturate every field into its display range, in place
    pub fn clamp(&mut self, limits: &ClampLimits) {
        self.rpm = limits.rpm.clamp(self.rpm);
        self.oil_pressure_primary = limits.oil_pressure.clamp(self.oil_pressure_primary);
        self.oil_pressure_secondary = limits.oil_pressure.clamp(self.oil_pressure_secondary);
        self.oil_temp = limits.temperature.clamp(self.oil_temp);
        self.engine_coolant_temp = limits.temperature.clamp(self.engine_coolant_temp);
        self.throttle_percent = limits.percent.clamp(self.throttle_percent);
        self.brake_percent = limits.percent.clamp(self.brake_percent);
        self.steering_angle = limits.steering.clamp(self.steering_angle);
    }

    /// Clamped copy of `self`
    pub fn clamped(mut self, limits: &ClampLimits) -> Self {
        self.clamp(limits);
        self
    }
}
