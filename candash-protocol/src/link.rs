//! Byte-stream envelope for the bridge and display UARTs.
//!
//! Frame format:
//! - SYNC (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): payload length (0-96)
//! - TYPE (1 byte): packet type
//! - PAYLOAD (0-96 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes
//!
//! The decoder keeps the payload in a fixed buffer and lends it out, so
//! receiving never allocates or copies a frame.

/// Frame synchronization byte
pub const LINK_SYNC: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_LINK_PAYLOAD: usize = 96;

/// Maximum complete frame size (SYNC + LENGTH + TYPE + payload + CHECKSUM)
pub const MAX_LINK_FRAME: usize = MAX_LINK_PAYLOAD + 4;

/// Packet types carried by the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinkPacket {
    /// One relayed CAN frame (bridge → dashboard)
    Relay = 0x01,
    /// One serialized render frame (dashboard → display unit)
    Render = 0x20,
}

impl LinkPacket {
    /// Parse a packet type from its wire byte
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(LinkPacket::Relay),
            0x20 => Some(LinkPacket::Render),
            _ => None,
        }
    }
}

/// Errors raised while framing or deframing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Declared or supplied payload exceeds [`MAX_LINK_PAYLOAD`]
    Oversize,
    /// Checksum mismatch
    Checksum,
    /// Well-formed frame with a type this side does not handle
    UnknownType(u8),
    /// Output buffer too small for encoding
    BufferTooSmall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sync,
    Length,
    Type,
    Payload,
    Checksum,
}

/// Incremental frame decoder
#[derive(Debug, Clone)]
pub struct LinkDecoder {
    phase: Phase,
    expected: usize,
    kind: u8,
    filled: usize,
    buf: [u8; MAX_LINK_PAYLOAD],
}

impl Default for LinkDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkDecoder {
    /// Create a decoder waiting for a SYNC byte
    pub const fn new() -> Self {
        Self {
            phase: Phase::Sync,
            expected: 0,
            kind: 0,
            filled: 0,
            buf: [0; MAX_LINK_PAYLOAD],
        }
    }

    /// Drop any partial frame and wait for the next SYNC byte
    pub fn reset(&mut self) {
        self.phase = Phase::Sync;
        self.expected = 0;
        self.filled = 0;
    }

    /// Feed one byte.
    ///
    /// Returns the packet type and payload once a frame with a valid checksum
    /// completes. The payload borrows the decoder and stays valid until the
    /// next call. On error the decoder has already resynchronized.
    pub fn push(&mut self, byte: u8) -> Result<Option<(LinkPacket, &[u8])>, LinkError> {
        match self.phase {
            Phase::Sync => {
                if byte == LINK_SYNC {
                    self.phase = Phase::Length;
                }
                Ok(None)
            }
            Phase::Length => {
                if usize::from(byte) > MAX_LINK_PAYLOAD {
                    self.reset();
                    return Err(LinkError::Oversize);
                }
                self.expected = usize::from(byte);
                self.phase = Phase::Type;
                Ok(None)
            }
            Phase::Type => {
                self.kind = byte;
                self.filled = 0;
                self.phase = if self.expected == 0 {
                    Phase::Checksum
                } else {
                    Phase::Payload
                };
                Ok(None)
            }
            Phase::Payload => {
                self.buf[self.filled] = byte;
                self.filled += 1;
                if self.filled == self.expected {
                    self.phase = Phase::Checksum;
                }
                Ok(None)
            }
            Phase::Checksum => {
                let len = self.expected;
                let kind = self.kind;
                self.reset();

                if byte != checksum(len as u8, kind, &self.buf[..len]) {
                    return Err(LinkError::Checksum);
                }
                match LinkPacket::from_u8(kind) {
                    Some(packet) => Ok(Some((packet, &self.buf[..len]))),
                    None => Err(LinkError::UnknownType(kind)),
                }
            }
        }
    }
}

/// XOR of length, type and payload
fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ kind, |acc, &b| acc ^ b)
}

/// Encode one frame into `out`, returning the number of bytes written
pub fn encode(packet: LinkPacket, payload: &[u8], out: &mut [u8]) -> Result<usize, LinkError> {
    if payload.len() > MAX_LINK_PAYLOAD {
        return Err(LinkError::Oversize);
    }
    let frame_len = payload.len() + 4;
    if out.len() < frame_len {
        return Err(LinkError::BufferTooSmall);
    }

    let length = payload.len() as u8;
    let kind = packet as u8;
    out[0] = LINK_SYNC;
    out[1] = length;
    out[2] = kind;
    out[3..3 + payload.len()].copy_from_slice(payload);
    out[3 + payload.len()] = checksum(length, kind, payload);

    Ok(frame_len)
}
