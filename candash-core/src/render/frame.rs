//! Render frame assembly

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DashConfig;
use crate::safety::Severities;
use crate::state::{DisplayMode, Layout, SecondaryMetric};
use crate::telemetry::TelemetryValues;

use super::shift::ShiftLevel;

/// Which screen to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum View {
    /// No frame received yet
    Connecting,
    /// Gauge cluster; the hero readout shows the given oil pressure channel
    DashMounted(SecondaryMetric),
    /// Steering-wheel screen with shift lights
    SteeringWheel,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderFrame {
    pub view: View,
    /// Clamped telemetry
    pub values: TelemetryValues,
    pub mode: DisplayMode,
    /// Oil alarm blink phase
    pub inverted: bool,
    pub shift: ShiftLevel,
    pub severities: Severities,
}

impl RenderFrame {
    /// Assemble a frame from a clamped copy of the telemetry
    pub fn build(
        values: TelemetryValues,
        mode: DisplayMode,
        connected: bool,
        inverted: bool,
        config: &DashConfig,
    ) -> Self {
        let view = match (connected, mode.layout) {
            (false, _) => View::Connecting,
            (true, Layout::A) => View::DashMounted(mode.secondary_metric),
            (true, Layout::B) => View::SteeringWheel,
        };
        let oil_pressure = values.get(mode.secondary_metric.oil_pressure_signal());

        Self {
            view,
            values,
            mode,
            inverted,
            shift: ShiftLevel::from_rpm(values.rpm, &config.shift),
            severities: Severities::evaluate(&values, oil_pressure, &config.severity),
        }
    }

    /// Oil pressure on the channel the driver selected
    pub fn oil_pressure(&self) -> i32 {
        self.values
            .get(self.mode.secondary_metric.oil_pressure_signal())
    }
}

/// Upper bound on a postcard-encoded [`RenderFrame`]
#[cfg(feature = "serde")]
pub const MAX_ENCODED_FRAME: usize = 64;

/// Serialize a frame for an external display unit
#[cfg(feature = "serde")]
pub fn encode_frame<'a>(
    frame: &RenderFrame,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8], crate::traits::DisplayError> {
    postcard::to_slice(frame, buf).map_err(|_| crate::traits::DisplayError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::Severity;

    fn values() -> TelemetryValues {
        TelemetryValues {
            rpm: 5200,
            oil_pressure_primary: 50,
            oil_pressure_secondary: 20,
            oil_temp: 230,
            engine_coolant_temp: 265,
            ..Default::default()
        }
    }

    #[test]
    fn test_connecting_until_latched() {
        let config = DashConfig::default();
        for layout in [Layout::A, Layout::B] {
            let mode = DisplayMode::new(layout, SecondaryMetric::P0);
            let frame = RenderFrame::build(values(), mode, false, false, &config);
            assert_eq!(frame.view, View::Connecting);
        }
    }

    #[test]
    fn test_view_follows_layout() {
        let config = DashConfig::default();
        let a = DisplayMode::new(Layout::A, SecondaryMetric::P1);
        assert_eq!(
            RenderFrame::build(values(), a, true, false, &config).view,
            View::DashMounted(SecondaryMetric::P1)
        );
        let b = DisplayMode::new(Layout::B, SecondaryMetric::P1);
        assert_eq!(
            RenderFrame::build(values(), b, true, false, &config).view,
            View::SteeringWheel
        );
    }

    #[test]
    fn test_frame_contents() {
        let config = DashConfig::default();
        let mode = DisplayMode::new(Layout::B, SecondaryMetric::P1);
        let frame = RenderFrame::build(values(), mode, true, true, &config);

        assert!(frame.inverted);
        assert_eq!(frame.shift, ShiftLevel::Two);
        assert_eq!(frame.oil_pressure(), 20);
        assert_eq!(frame.severities.oil_pressure, Severity::Warning);
        assert_eq!(frame.severities.oil_temp, Severity::Normal);
        assert_eq!(frame.severities.engine_coolant_temp, Severity::Critical);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_worst_case_frame_fits() {
        let config = DashConfig::default();
        let extreme = TelemetryValues {
            rpm: i32::MIN,
            oil_pressure_primary: i32::MIN,
            oil_pressure_secondary: i32::MIN,
            oil_temp: i32::MIN,
            engine_coolant_temp: i32::MIN,
            throttle_percent: i32::MIN,
            brake_percent: i32::MIN,
            steering_angle: i32::MIN,
        };
        let mode = DisplayMode::new(Layout::A, SecondaryMetric::P1);
        let frame = RenderFrame::build(extreme, mode, true, true, &config);

        let mut buf = [0u8; MAX_ENCODED_FRAME];
        let encoded = encode_frame(&frame, &mut buf).unwrap();
        assert!(encoded.len() <= candash_protocol::MAX_LINK_PAYLOAD);

        let decoded: RenderFrame = postcard::from_bytes(encoded).unwrap();
        assert_eq!(decoded, frame);
    }
}
