//! Display mode state machine and its persistence
//!
//! The mode is two independent two-way toggles. Input handlers flip them in
//! a shared atomic word; the render task alone writes the word to flash, and
//! only when it changed since the last write.

pub mod display_mode;
pub mod events;
pub mod persistence;
pub mod store;

pub use display_mode::{DisplayMode, Layout, ModeDecodeError, SecondaryMetric, MODE_FORMAT_VERSION};
pub use events::InputEvent;
pub use persistence::{ModePersistence, RestoreOutcome, SyncOutcome};
pub use store::DisplayModeStore;
