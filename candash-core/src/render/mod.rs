//! Per-cycle handoff to the renderer
//!
//! Everything a renderer needs to draw one frame, already clamped and
//! classified, so the renderer holds no policy of its own.

pub mod frame;
pub mod shift;

#[cfg(feature = "serde")]
pub use frame::{encode_frame, MAX_ENCODED_FRAME};
pub use frame::{RenderFrame, View};
pub use shift::{LampColor, ShiftLevel, SHIFT_LAMPS};
