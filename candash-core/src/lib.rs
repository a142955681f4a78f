//! Board-agnostic core logic for the candash dashboard
//!
//! This crate holds everything between a decoded CAN signal and the
//! renderer that does not depend on specific hardware:
//!
//! - Shared telemetry snapshot and connection latch
//! - Display mode state machine and its debounced persistence
//! - Oil pressure alarm, shift light and severity policies
//! - Render frame handed to the display each cycle
//! - Configuration type definitions and the `dash.toml` parser
//!
//! # Concurrency roles
//!
//! There is one *producer* (the link receive task, or the mock source) and
//! one *consumer* (the render task). The producer only performs single-field
//! atomic stores and never blocks. The consumer copies the snapshot field by
//! field each cycle, so a copy may mix values from two frames but never holds
//! a half-written field. Input handlers and the alarm tick are additional
//! lock-free readers and writers of their own words.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dashboard;
pub mod render;
pub mod safety;
pub mod state;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
mod testing;

pub use dashboard::{Dashboard, FrameDisposition};
