//! Readout colouring
//!
//! Temperatures get worse as they rise, oil pressure as it falls. Both
//! comparisons are strict: a value sitting exactly on a threshold is still
//! the milder class.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SeverityThresholds;
use crate::telemetry::TelemetryValues;

/// How alarming a reading is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Classify a reading that is bad when high
    pub fn above(value: i32, warning: i32, critical: i32) -> Self {
        if value > critical {
            Severity::Critical
        } else if value > warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Classify a reading that is bad when low
    pub fn below(value: i32, warning: i32, critical: i32) -> Self {
        if value < critical {
            Severity::Critical
        } else if value < warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Severity of every coloured readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Severities {
    /// The oil pressure channel on screen
    pub oil_pressure: Severity,
    pub oil_temp: Severity,
    pub engine_coolant_temp: Severity,
}

impl Severities {
    /// Classify clamped values; `oil_pressure` is the channel being shown
    pub fn evaluate(
        values: &TelemetryValues,
        oil_pressure: i32,
        thresholds: &SeverityThresholds,
    ) -> Self {
        let t = thresholds;
        Self {
            oil_pressure: Severity::below(
                oil_pressure,
                t.oil_pressure_warning,
                t.oil_pressure_critical,
            ),
            oil_temp: Severity::above(values.oil_temp, t.temperature_warning, t.temperature_critical),
            engine_coolant_temp: Severity::above(
                values.engine_coolant_temp,
                t.temperature_warning,
                t.temperature_critical,
            ),
        }
    }

    /// Worst of all readouts
    pub fn worst(&self) -> Severity {
        self.oil_pressure
            .max(self.oil_temp)
            .max(self.engine_coolant_temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_above_thresholds() {
        assert_eq!(Severity::above(240, 240, 260), Severity::Normal);
        assert_eq!(Severity::above(241, 240, 260), Severity::Warning);
        assert_eq!(Severity::above(260, 240, 260), Severity::Warning);
        assert_eq!(Severity::above(261, 240, 260), Severity::Critical);
    }

    #[test]
    fn test_below_thresholds() {
        assert_eq!(Severity::below(30, 30, 10), Severity::Normal);
        assert_eq!(Severity::below(29, 30, 10), Severity::Warning);
        assert_eq!(Severity::below(10, 30, 10), Severity::Warning);
        assert_eq!(Severity::below(9, 30, 10), Severity::Critical);
    }

    #[test]
    fn test_evaluate_defaults() {
        let values = TelemetryValues {
            oil_temp: 250,
            engine_coolant_temp: 190,
            ..Default::default()
        };
        let s = Severities::evaluate(&values, 5, &SeverityThresholds::default());
        assert_eq!(s.oil_pressure, Severity::Critical);
        assert_eq!(s.oil_temp, Severity::Warning);
        assert_eq!(s.engine_coolant_temp, Severity::Normal);
        assert_eq!(s.worst(), Severity::Critical);
    }
}
