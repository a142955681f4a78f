//! Configuration type definitions
//!
//! Every numeric policy of the dashboard lives here rather than in the code
//! that applies it. Defaults reproduce the stock dash; the firmware overrides
//! them from `dash.toml`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive range a displayed value is held to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Saturate `value` into the range
    ///
    /// Never panics, even for an inverted range (the lower bound wins).
    #[inline]
    pub fn clamp(&self, value: i32) -> i32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Display ranges applied to the consumer's copy of the telemetry
///
/// Older single-sensor harnesses report oil pressure on a 0-160 scale; set
/// `oil_pressure` accordingly for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClampLimits {
    pub rpm: Bounds,
    /// Applies to both oil pressure channels (psi)
    pub oil_pressure: Bounds,
    /// Applies to oil and coolant temperature (°F)
    pub temperature: Bounds,
    /// Applies to throttle and brake (%)
    pub percent: Bounds,
    /// Steering angle (0.1°)
    pub steering: Bounds,
}

impl Default for ClampLimits {
    fn default() -> Self {
        Self {
            rpm: Bounds::new(0, 9999),
            oil_pressure: Bounds::new(0, 200),
            temperature: Bounds::new(0, 300),
            percent: Bounds::new(0, 100),
            steering: Bounds::new(-900, 900),
        }
    }
}

/// Shift light thresholds in rpm, one per lit stage
///
/// Index 0 lights the first lamp; the last two entries are the shift
/// point and the over-rev warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftPoints {
    pub thresholds: [i32; SHIFT_STAGES],
}

/// Number of shift light stages above "off"
pub const SHIFT_STAGES: usize = 8;

impl Default for ShiftPoints {
    fn default() -> Self {
        Self {
            thresholds: [4700, 5100, 5500, 5900, 6300, 6800, 7200, 7525],
        }
    }
}

/// Low oil pressure under load warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OilAlarmConfig {
    /// Alarm only armed at or above this engine speed
    pub min_rpm: i32,
    /// Alarm fires below this pressure (psi) on the selected channel
    pub min_pressure: i32,
}

impl Default for OilAlarmConfig {
    fn default() -> Self {
        Self {
            min_rpm: 3500,
            min_pressure: 35,
        }
    }
}

/// Warning and critical levels used to colour individual readouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeverityThresholds {
    pub oil_pressure_warning: i32,
    pub oil_pressure_critical: i32,
    pub temperature_warning: i32,
    pub temperature_critical: i32,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            oil_pressure_warning: 30,
            oil_pressure_critical: 10,
            temperature_warning: 240,
            temperature_critical: 260,
        }
    }
}

/// Task cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Render cycle period; the display mode is persisted at most this often
    pub render_period_ms: u32,
    /// Oil alarm blink period
    pub alarm_tick_ms: u32,
    /// Ignore repeat presses of a mode button for this long
    pub input_lockout_ms: u32,
    /// Step period of the mock data source
    pub mock_step_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            render_period_ms: 10,
            alarm_tick_ms: 100,
            input_lockout_ms: 50,
            mock_step_ms: 80,
        }
    }
}

/// Where telemetry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataSource {
    /// Relay frames from the wireless bridge
    #[default]
    Link,
    /// Built-in sweep generator for bench testing
    Mock,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A clamp range has min > max
    InvertedBounds,
    /// Shift points are not strictly increasing
    UnorderedShiftPoints,
    /// Severity levels are on the wrong side of each other
    InvertedSeverity,
    /// A task period is zero
    ZeroPeriod,
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashConfig {
    pub source: DataSource,
    pub clamp: ClampLimits,
    pub shift: ShiftPoints,
    pub oil_alarm: OilAlarmConfig,
    pub severity: SeverityThresholds,
    pub timing: TimingConfig,
}

impl DashConfig {
    /// Check the cross-field invariants the runtime relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let clamp = &self.clamp;
        let ranges = [
            clamp.rpm,
            clamp.oil_pressure,
            clamp.temperature,
            clamp.percent,
            clamp.steering,
        ];
        if !ranges.iter().all(Bounds::is_ordered) {
            return Err(ConfigError::InvertedBounds);
        }

        if !self.shift.thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(ConfigError::UnorderedShiftPoints);
        }

        let sev = &self.severity;
        if sev.oil_pressure_critical > sev.oil_pressure_warning
            || sev.temperature_critical < sev.temperature_warning
        {
            return Err(ConfigError::InvertedSeverity);
        }

        let t = &self.timing;
        if t.render_period_ms == 0 || t.alarm_tick_ms == 0 || t.mock_step_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        Ok(())
    }
}
