//! Bench data source
//!
//! Stands in for the bridge when no car is attached: engine held at a fixed
//! speed while both oil pressure channels ramp up and down, which walks the
//! oil alarm in and out of its trigger band.

use candash_protocol::Signal;

use super::snapshot::TelemetrySnapshot;

/// Engine speed written on every step
pub const MOCK_RPM: i32 = 4000;

/// Sweep turns downward once the primary channel is above this
pub const SWEEP_HIGH: i32 = 60;

/// Sweep turns upward once the primary channel is below this
pub const SWEEP_LOW: i32 = 10;

/// Triangle sweep of the oil pressure channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MockSweep {
    rising: bool,
}

impl Default for MockSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSweep {
    pub const fn new() -> Self {
        Self { rising: true }
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Advance the sweep by one step
    ///
    /// Must be the only writer of the snapshot while it runs.
    pub fn step(&mut self, snapshot: &TelemetrySnapshot) {
        snapshot.store(Signal::Rpm, MOCK_RPM);

        let delta = if self.rising { 1 } else { -1 };
        let primary = snapshot.load(Signal::OilPressurePrimary) + delta;
        let secondary = snapshot.load(Signal::OilPressureSecondary) + delta;
        snapshot.store(Signal::OilPressurePrimary, primary);
        snapshot.store(Signal::OilPressureSecondary, secondary);

        if primary > SWEEP_HIGH {
            self.rising = false;
        }
        if primary < SWEEP_LOW {
            self.rising = true;
        }
    }
}
