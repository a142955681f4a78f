//! Events that change the display mode

/// Logical mode buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Switch between the dash-mounted and steering-wheel layouts
    AdvanceLayout,
    /// Switch which oil pressure channel is shown
    AdvanceSecondaryMetric,
}
