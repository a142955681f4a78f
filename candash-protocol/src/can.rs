//! Relay frame layout and per-identifier signal decoding
//!
//! Only the five identifiers the dashboard displays are decoded. Anything
//! else on the bus is relayed too, but carries nothing we use.

use heapless::Vec;

use crate::bits::extract_le;

/// Length of the frame identifier prefix
pub const RELAY_ID_LEN: usize = 4;

/// Length of a classic CAN data field
pub const CAN_PAYLOAD_LEN: usize = 8;

/// Shortest relay frame that can be interpreted (identifier + full payload)
pub const MIN_RELAY_LEN: usize = RELAY_ID_LEN + CAN_PAYLOAD_LEN;

/// Largest number of signals carried by one decoded frame
pub const MAX_UPDATES_PER_FRAME: usize = 2;

/// Signal updates produced by one frame
pub type SignalUpdates = Vec<SignalUpdate, MAX_UPDATES_PER_FRAME>;

/// A relayed CAN frame borrowed from the receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayFrame<'a> {
    /// Raw CAN identifier
    pub id: u32,
    /// Data bytes following the identifier (at least [`CAN_PAYLOAD_LEN`])
    pub payload: &'a [u8],
}

impl<'a> RelayFrame<'a> {
    /// Split a relay frame into identifier and payload
    ///
    /// Returns `None` for frames shorter than [`MIN_RELAY_LEN`]; those are
    /// truncated in transit and are dropped without further inspection.
    pub fn parse(bytes: &'a [u8]) -> Option<Self> {
        if bytes.len() < MIN_RELAY_LEN {
            return None;
        }
        let id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        Some(Self {
            id,
            payload: &bytes[RELAY_ID_LEN..],
        })
    }

    /// The identifier, if it is one the dashboard decodes
    pub fn frame_id(&self) -> Option<FrameId> {
        FrameId::from_u32(self.id)
    }

    /// Build the wire form of a relay frame
    pub fn encode(id: u32, payload: &[u8; CAN_PAYLOAD_LEN]) -> [u8; MIN_RELAY_LEN] {
        let mut out = [0u8; MIN_RELAY_LEN];
        out[..RELAY_ID_LEN].copy_from_slice(&id.to_le_bytes());
        out[RELAY_ID_LEN..].copy_from_slice(payload);
        out
    }
}

/// CAN identifiers decoded by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum FrameId {
    /// Engine speed and accelerator pedal position
    EngineSpeed = 0x040,
    /// Steering wheel angle
    SteeringAngle = 0x138,
    /// Brake pedal pressure
    Brake = 0x139,
    /// Oil and coolant temperature
    Temperatures = 0x345,
    /// Twin-channel oil pressure sensor module
    OilPressure = 0x662,
}

impl FrameId {
    /// Look up a raw identifier
    pub fn from_u32(id: u32) -> Option<Self> {
        match id {
            0x040 => Some(FrameId::EngineSpeed),
            0x138 => Some(FrameId::SteeringAngle),
            0x139 => Some(FrameId::Brake),
            0x345 => Some(FrameId::Temperatures),
            0x662 => Some(FrameId::OilPressure),
            _ => None,
        }
    }

    /// Raw identifier value
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Physical quantities tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Engine speed (rpm)
    Rpm,
    /// Oil pressure, sensor channel 0 (psi)
    OilPressurePrimary,
    /// Oil pressure, sensor channel 1 (psi)
    OilPressureSecondary,
    /// Oil temperature (°F)
    OilTemp,
    /// Engine coolant temperature (°F)
    EngineCoolantTemp,
    /// Accelerator pedal position (%)
    ThrottlePercent,
    /// Brake pedal pressure (%)
    BrakePercent,
    /// Steering wheel angle (0.1°)
    SteeringAngle,
}

impl Signal {
    /// Number of distinct signals
    pub const COUNT: usize = 8;

    /// Every signal, in snapshot order
    pub const ALL: [Signal; Signal::COUNT] = [
        Signal::Rpm,
        Signal::OilPressurePrimary,
        Signal::OilPressureSecondary,
        Signal::OilTemp,
        Signal::EngineCoolantTemp,
        Signal::ThrottlePercent,
        Signal::BrakePercent,
        Signal::SteeringAngle,
    ];

    /// Position of this signal in [`Signal::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A new value for one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalUpdate {
    pub signal: Signal,
    pub value: i32,
}

impl SignalUpdate {
    const fn new(signal: Signal, value: i32) -> Self {
        Self { signal, value }
    }
}

/// Decode the signals carried by a known frame.
///
/// All scaling uses truncating integer arithmetic. A payload shorter than
/// [`CAN_PAYLOAD_LEN`] yields no updates.
pub fn decode(id: FrameId, payload: &[u8]) -> SignalUpdates {
    if payload.len() < CAN_PAYLOAD_LEN {
        return SignalUpdates::new();
    }
    let p = payload;

    match id {
        FrameId::EngineSpeed => collect(&[
            SignalUpdate::new(Signal::Rpm, extract_le(p, 16, 14) as i32),
            SignalUpdate::new(Signal::ThrottlePercent, i32::from(p[4]) * 100 / 255),
        ]),
        FrameId::SteeringAngle => collect(&[SignalUpdate::new(
            Signal::SteeringAngle,
            i32::from(i16::from_le_bytes([p[2], p[3]])) / 10,
        )]),
        FrameId::Brake => collect(&[SignalUpdate::new(
            Signal::BrakePercent,
            i32::from(p[5]) * 128 / 100,
        )]),
        FrameId::Temperatures => collect(&[
            SignalUpdate::new(Signal::OilTemp, celsius_offset_to_fahrenheit(p[3])),
            SignalUpdate::new(Signal::EngineCoolantTemp, celsius_offset_to_fahrenheit(p[4])),
        ]),
        FrameId::OilPressure => collect(&[
            SignalUpdate::new(Signal::OilPressurePrimary, extract_le(p, 0, 16) as i32 / 10),
            SignalUpdate::new(Signal::OilPressureSecondary, extract_le(p, 16, 16) as i32 / 10),
        ]),
    }
}

/// Temperatures are sent as °C + 40 in one byte
fn celsius_offset_to_fahrenheit(raw: u8) -> i32 {
    (i32::from(raw) - 40) * 9 / 5 + 32
}

fn collect(items: &[SignalUpdate]) -> SignalUpdates {
    let mut updates = SignalUpdates::new();
    for &update in items {
        // Cannot fail: no frame carries more than MAX_UPDATES_PER_FRAME signals
        let _ = updates.push(update);
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value_of(updates: &SignalUpdates, signal: Signal) -> Option<i32> {
        updates.iter().find(|u| u.signal == signal).map(|u| u.value)
    }

    #[test]
    fn test_parse_splits_identifier() {
        let bytes = [0x62, 0x06, 0x00, 0x00, 1, 2, 3, 4, 5, 6, 7, 8];
        let frame = RelayFrame::parse(&bytes).unwrap();
        assert_eq!(frame.id, 0x662);
        assert_eq!(frame.frame_id(), Some(FrameId::OilPressure));
        assert_eq!(frame.payload, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_rejects_short_frames() {
        let bytes = [0x40, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        for len in 0..MIN_RELAY_LEN {
            assert!(RelayFrame::parse(&bytes[..len]).is_none());
        }
    }

    #[test]
    fn test_parse_keeps_trailing_bytes() {
        let bytes = [0x40, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let frame = RelayFrame::parse(&bytes).unwrap();
        assert_eq!(frame.payload.len(), 9);
    }

    #[test]
    fn test_encode_matches_parse() {
        let bytes = RelayFrame::encode(0x345, &[0, 0, 0, 130, 120, 0, 0, 0]);
        assert_eq!(&bytes[..4], &[0x45, 0x03, 0x00, 0x00]);
        let frame = RelayFrame::parse(&bytes).unwrap();
        assert_eq!(frame.frame_id(), Some(FrameId::Temperatures));
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(FrameId::from_u32(0x41), None);
        assert_eq!(FrameId::from_u32(0x662_0000), None);
    }

    #[test]
    fn test_oil_pressure() {
        let payload = [0xF4, 0x01, 0x5E, 0x01, 0, 0, 0, 0]; // 500, 350
        let updates = decode(FrameId::OilPressure, &payload);
        assert_eq!(value_of(&updates, Signal::OilPressurePrimary), Some(50));
        assert_eq!(value_of(&updates, Signal::OilPressureSecondary), Some(35));
    }

    #[test]
    fn test_engine_speed_and_throttle() {
        // rpm 3000 = 0x0BB8 at bit 16, throttle byte 255
        let payload = [0, 0, 0xB8, 0x0B, 255, 0, 0, 0];
        let updates = decode(FrameId::EngineSpeed, &payload);
        assert_eq!(value_of(&updates, Signal::Rpm), Some(3000));
        assert_eq!(value_of(&updates, Signal::ThrottlePercent), Some(100));

        let payload = [0, 0, 0, 0, 128, 0, 0, 0];
        let updates = decode(FrameId::EngineSpeed, &payload);
        assert_eq!(value_of(&updates, Signal::ThrottlePercent), Some(50));
    }

    #[test]
    fn test_steering_is_signed() {
        // -4505 tenths -> -450 (truncates toward zero)
        let raw = (-4505i16).to_le_bytes();
        let payload = [0, 0, raw[0], raw[1], 0, 0, 0, 0];
        let updates = decode(FrameId::SteeringAngle, &payload);
        assert_eq!(value_of(&updates, Signal::SteeringAngle), Some(-450));
    }

    #[test]
    fn test_brake_scaling() {
        let payload = [0, 0, 0, 0, 0, 50, 0, 0];
        let updates = decode(FrameId::Brake, &payload);
        assert_eq!(value_of(&updates, Signal::BrakePercent), Some(64));
    }

    #[test]
    fn test_temperatures_in_fahrenheit() {
        // 130 - 40 = 90°C = 194°F; 40 - 40 = 0°C = 32°F
        let payload = [0, 0, 0, 130, 40, 0, 0, 0];
        let updates = decode(FrameId::Temperatures, &payload);
        assert_eq!(value_of(&updates, Signal::OilTemp), Some(194));
        assert_eq!(value_of(&updates, Signal::EngineCoolantTemp), Some(32));

        // Below zero truncates toward zero like the sensor firmware does
        let payload = [0, 0, 0, 0, 39, 0, 0, 0];
        let updates = decode(FrameId::Temperatures, &payload);
        assert_eq!(value_of(&updates, Signal::OilTemp), Some(-40));
        assert_eq!(value_of(&updates, Signal::EngineCoolantTemp), Some(31));
    }

    #[test]
    fn test_short_payload_yields_nothing() {
        let payload = [0xFF; 7];
        assert!(decode(FrameId::OilPressure, &payload).is_empty());
    }

    proptest! {
        #[test]
        fn prop_decoded_values_stay_in_wire_range(
            payload in proptest::array::uniform8(any::<u8>()),
        ) {
            for id in [
                FrameId::EngineSpeed,
                FrameId::SteeringAngle,
                FrameId::Brake,
                FrameId::Temperatures,
                FrameId::OilPressure,
            ] {
                for update in decode(id, &payload) {
                    let range = match update.signal {
                        Signal::Rpm => 0..=0x3FFF,
                        Signal::ThrottlePercent => 0..=100,
                        Signal::BrakePercent => 0..=326,
                        Signal::OilTemp | Signal::EngineCoolantTemp => -40..=419,
                        Signal::OilPressurePrimary | Signal::OilPressureSecondary => 0..=6553,
                        Signal::SteeringAngle => -3276..=3276,
                    };
                    prop_assert!(range.contains(&update.value), "{:?}", update);
                }
            }
        }
    }
}
