//! Shift light ladder
//!
//! Six lamps fill yellow, yellow, orange, orange, blue, blue as rpm climbs,
//! all go blue at the shift point and all red past over-rev.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ShiftPoints;

/// Number of physical shift lamps
pub const SHIFT_LAMPS: usize = 6;

/// Lamp colour classes; the renderer picks the actual colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LampColor {
    Off,
    Yellow,
    Orange,
    Blue,
    Red,
}

/// Colour of each lamp while it is filling up
const FILL_COLORS: [LampColor; SHIFT_LAMPS] = [
    LampColor::Yellow,
    LampColor::Yellow,
    LampColor::Orange,
    LampColor::Orange,
    LampColor::Blue,
    LampColor::Blue,
];

/// Shift light stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShiftLevel {
    #[default]
    None,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Shift,
    OverRev,
}

impl ShiftLevel {
    const LADDER: [ShiftLevel; 9] = [
        ShiftLevel::None,
        ShiftLevel::One,
        ShiftLevel::Two,
        ShiftLevel::Three,
        ShiftLevel::Four,
        ShiftLevel::Five,
        ShiftLevel::Six,
        ShiftLevel::Shift,
        ShiftLevel::OverRev,
    ];

    /// Stage for an engine speed
    pub fn from_rpm(rpm: i32, points: &ShiftPoints) -> Self {
        let reached = points.thresholds.iter().take_while(|&&t| rpm >= t).count();
        Self::LADDER[reached]
    }

    /// Number of lamps lit
    pub fn lit_lamps(self) -> usize {
        (self as usize).min(SHIFT_LAMPS)
    }

    /// Colour of lamp `index`, counted from the bottom
    pub fn lamp(self, index: usize) -> LampColor {
        if index >= SHIFT_LAMPS {
            return LampColor::Off;
        }
        match self {
            ShiftLevel::Shift => LampColor::Blue,
            ShiftLevel::OverRev => LampColor::Red,
            level if index < level.lit_lamps() => FILL_COLORS[index],
            _ => LampColor::Off,
        }
    }

    /// Colours of all lamps, bottom first
    pub fn lamps(self) -> [LampColor; SHIFT_LAMPS] {
        core::array::from_fn(|i| self.lamp(i))
    }
}
