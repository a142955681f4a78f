//! Display mode value and its persisted encoding
//!
//! Packed form (one `u32`):
//!
//! ```text
//! bits 31..24  version           (1)
//! bits 23..16  reserved          (0)
//! bits 15..8   secondary metric  (0 = P0, 1 = P1)
//! bits  7..0   layout            (0 = A, 1 = B)
//! ```
//!
//! Anything else found in storage is treated as corruption.

use candash_protocol::Signal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::events::InputEvent;

/// Version tag written into the top byte of the packed mode
pub const MODE_FORMAT_VERSION: u8 = 1;

/// Screen arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Dash-mounted gauge cluster
    #[default]
    A,
    /// Steering-wheel view with shift lights
    B,
}

impl Layout {
    pub fn next(self) -> Self {
        match self {
            Layout::A => Layout::B,
            Layout::B => Layout::A,
        }
    }

    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Layout::A),
            1 => Some(Layout::B),
            _ => None,
        }
    }
}

/// Which oil pressure channel the secondary readout shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SecondaryMetric {
    #[default]
    P0,
    P1,
}

impl SecondaryMetric {
    pub fn next(self) -> Self {
        match self {
            SecondaryMetric::P0 => SecondaryMetric::P1,
            SecondaryMetric::P1 => SecondaryMetric::P0,
        }
    }

    /// Telemetry field this metric selects
    pub fn oil_pressure_signal(self) -> Signal {
        match self {
            SecondaryMetric::P0 => Signal::OilPressurePrimary,
            SecondaryMetric::P1 => Signal::OilPressureSecondary,
        }
    }

    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(SecondaryMetric::P0),
            1 => Some(SecondaryMetric::P1),
            _ => None,
        }
    }
}

/// Reasons a stored word is not a valid mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeDecodeError {
    /// Top byte is not [`MODE_FORMAT_VERSION`]
    Version(u8),
    /// Reserved byte is not zero
    Reserved,
    /// Layout byte out of range
    Layout(u8),
    /// Secondary metric byte out of range
    SecondaryMetric(u8),
}

/// Complete display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayMode {
    pub layout: Layout,
    pub secondary_metric: SecondaryMetric,
}

impl DisplayMode {
    pub const fn new(layout: Layout, secondary_metric: SecondaryMetric) -> Self {
        Self {
            layout,
            secondary_metric,
        }
    }

    /// Apply an input event
    pub fn transition(self, event: InputEvent) -> Self {
        match event {
            InputEvent::AdvanceLayout => Self {
                layout: self.layout.next(),
                ..self
            },
            InputEvent::AdvanceSecondaryMetric => Self {
                secondary_metric: self.secondary_metric.next(),
                ..self
            },
        }
    }

    /// Encode for storage
    pub fn pack(self) -> u32 {
        (u32::from(MODE_FORMAT_VERSION) << 24)
            | ((self.secondary_metric as u32) << 8)
            | (self.layout as u32)
    }

    /// Decode a stored word
    pub fn unpack(word: u32) -> Result<Self, ModeDecodeError> {
        let [layout, metric, reserved, version] = word.to_le_bytes();

        if version != MODE_FORMAT_VERSION {
            return Err(ModeDecodeError::Version(version));
        }
        if reserved != 0 {
            return Err(ModeDecodeError::Reserved);
        }
        let layout = Layout::from_u8(layout).ok_or(ModeDecodeError::Layout(layout))?;
        let secondary_metric =
            SecondaryMetric::from_u8(metric).ok_or(ModeDecodeError::SecondaryMetric(metric))?;

        Ok(Self {
            layout,
            secondary_metric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_MODES: [DisplayMode; 4] = [
        DisplayMode::new(Layout::A, SecondaryMetric::P0),
        DisplayMode::new(Layout::A, SecondaryMetric::P1),
        DisplayMode::new(Layout::B, SecondaryMetric::P0),
        DisplayMode::new(Layout::B, SecondaryMetric::P1),
    ];

    #[test]
    fn test_default_is_a_p0() {
        assert_eq!(
            DisplayMode::default(),
            DisplayMode::new(Layout::A, SecondaryMetric::P0)
        );
    }

    #[test]
    fn test_advancing_twice_is_identity() {
        for mode in ALL_MODES {
            for event in [InputEvent::AdvanceLayout, InputEvent::AdvanceSecondaryMetric] {
                assert_eq!(mode.transition(event).transition(event), mode);
                assert_ne!(mode.transition(event), mode);
            }
        }
    }

    #[test]
    fn test_events_touch_one_dimension() {
        let mode = DisplayMode::new(Layout::A, SecondaryMetric::P1);
        let next = mode.transition(InputEvent::AdvanceLayout);
        assert_eq!(next.layout, Layout::B);
        assert_eq!(next.secondary_metric, SecondaryMetric::P1);

        let next = mode.transition(InputEvent::AdvanceSecondaryMetric);
        assert_eq!(next.layout, Layout::A);
        assert_eq!(next.secondary_metric, SecondaryMetric::P0);
    }

    #[test]
    fn test_packed_layout() {
        assert_eq!(DisplayMode::default().pack(), 0x0100_0000);
        assert_eq!(DisplayMode::new(Layout::B, SecondaryMetric::P1).pack(), 0x0100_0101);
    }

    #[test]
    fn test_pack_unpack_all_modes() {
        for mode in ALL_MODES {
            assert_eq!(DisplayMode::unpack(mode.pack()), Ok(mode));
        }
    }

    #[test]
    fn test_unpack_rejects_corruption() {
        assert_eq!(DisplayMode::unpack(0), Err(ModeDecodeError::Version(0)));
        assert_eq!(
            DisplayMode::unpack(0xFFFF_FFFF),
            Err(ModeDecodeError::Version(0xFF))
        );
        assert_eq!(
            DisplayMode::unpack(0x0101_0000),
            Err(ModeDecodeError::Reserved)
        );
        assert_eq!(
            DisplayMode::unpack(0x0100_0002),
            Err(ModeDecodeError::Layout(2))
        );
        assert_eq!(
            DisplayMode::unpack(0x0100_0700),
            Err(ModeDecodeError::SecondaryMetric(7))
        );
    }

    #[test]
    fn test_metric_selects_channel() {
        assert_eq!(
            SecondaryMetric::P0.oil_pressure_signal(),
            Signal::OilPressurePrimary
        );
        assert_eq!(
            SecondaryMetric::P1.oil_pressure_signal(),
            Signal::OilPressureSecondary
        );
    }

    proptest! {
        #[test]
        fn prop_unpack_accepts_only_packed_modes(word in any::<u32>()) {
            match DisplayMode::unpack(word) {
                Ok(mode) => prop_assert_eq!(mode.pack(), word),
                Err(_) => prop_assert!(ALL_MODES.iter().all(|m| m.pack() != word)),
            }
        }
    }
}
