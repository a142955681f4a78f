//! Hardware abstraction traits
//!
//! The boundary between core logic and whatever draws the screen.

pub mod display;

pub use display::{DashDisplay, DisplayError};
