//! CAN relay protocol for the dashboard
//!
//! The vehicle-side bridge sniffs the CAN bus and relays selected frames
//! over a wireless link. Each relayed frame reaches the dashboard as:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ FRAME ID     │ PAYLOAD                      │
//! │ 4B (u32 LE)  │ 8B (CAN data bytes d0..d7)   │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! - [`bits`] extracts little-endian packed bit fields from a payload
//! - [`can`] splits relay frames and turns known identifiers into signal updates
//! - [`link`] is the byte-stream envelope used on the bridge and display UARTs

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bits;
pub mod can;
pub mod link;

pub use bits::extract_le;
pub use can::{decode, FrameId, RelayFrame, Signal, SignalUpdate, SignalUpdates, MIN_RELAY_LEN};
pub use link::{LinkDecoder, LinkError, LinkPacket, LINK_SYNC, MAX_LINK_PAYLOAD};
