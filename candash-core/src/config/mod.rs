//! Configuration types and parsing
//!
//! The runtime reads a small TOML subset; see [`parse`] for what is
//! accepted.

pub mod parse;
pub mod types;

pub use parse::{parse, ParseError};
pub use types::{
    Bounds, ClampLimits, ConfigError, DashConfig, DataSource, OilAlarmConfig, SeverityThresholds,
    ShiftPoints, TimingConfig, SHIFT_STAGES,
};
