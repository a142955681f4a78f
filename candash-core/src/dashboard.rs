//! Process-wide shared state
//!
//! One [`Dashboard`] lives for the whole program and every task gets a
//! `&'static` reference to it. All of its methods take `&self` and are
//! lock-free, so the frame producer never waits on the render consumer.

use candash_protocol::{decode, FrameId, RelayFrame};

use crate::config::DashConfig;
use crate::render::RenderFrame;
use crate::safety::OilPressureAlarm;
use crate::state::{DisplayMode, DisplayModeStore, InputEvent};
use crate::telemetry::{ConnectionLatch, TelemetrySnapshot};

/// What [`Dashboard::on_frame`] did with a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameDisposition {
    /// Too short to hold an identifier and payload; nothing changed
    Discarded,
    /// Well-formed but not an identifier we decode; latch set only
    Unrecognized(u32),
    /// Decoded into the snapshot
    Applied(FrameId),
}

/// Shared dashboard state
#[derive(Debug, Default)]
pub struct Dashboard {
    /// Latest decoded values (written by the producer)
    pub telemetry: TelemetrySnapshot,
    /// Set by the first accepted frame
    pub link: ConnectionLatch,
    /// Live display mode (written by input handlers)
    pub mode: DisplayModeStore,
    /// Oil alarm blink phase (written by the alarm tick)
    pub alarm: OilPressureAlarm,
}

impl Dashboard {
    /// Fresh state with the given starting mode
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            telemetry: TelemetrySnapshot::new(),
            link: ConnectionLatch::new(),
            mode: DisplayModeStore::new(mode),
            alarm: OilPressureAlarm::new(),
        }
    }

    /// Ingest one relay frame
    ///
    /// Producer side. Never blocks and never allocates.
    pub fn on_frame(&self, bytes: &[u8]) -> FrameDisposition {
        let Some(frame) = RelayFrame::parse(bytes) else {
            return FrameDisposition::Discarded;
        };

        let disposition = match frame.frame_id() {
            Some(id) => {
                for update in decode(id, frame.payload).iter() {
                    self.telemetry.apply(update);
                }
                FrameDisposition::Applied(id)
            }
            None => FrameDisposition::Unrecognized(frame.id),
        };

        self.link.mark_connected();
        disposition
    }

    /// Apply a mode button press, returning the new mode
    pub fn on_input(&self, event: InputEvent) -> DisplayMode {
        self.mode.apply(event)
    }

    /// Advance the oil alarm blink; call on the alarm tick
    pub fn tick_alarm(&self, config: &DashConfig) -> bool {
        let metric = self.mode.current().secondary_metric;
        self.alarm.tick(&self.telemetry, metric, &config.oil_alarm)
    }

    /// Build this cycle's render frame
    ///
    /// Consumer side. Copies the snapshot, clamps the copy and reads the
    /// mode, latch and alarm flag.
    pub fn render_frame(&self, config: &DashConfig) -> RenderFrame {
        let values = self.telemetry.copy().clamped(&config.clamp);
        RenderFrame::build(
            values,
            self.mode.current(),
            self.link.is_connected(),
            self.alarm.is_inverted(),
            config,
        )
    }
}
