//! Display sink trait

use core::future::Future;

use crate::render::RenderFrame;

/// Errors that can occur handing a frame to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Frame could not be serialized
    Encode,
    /// Link framing failed (frame too large for the envelope)
    Frame,
    /// Transport write failed
    Io,
}

impl From<candash_protocol::LinkError> for DisplayError {
    fn from(_: candash_protocol::LinkError) -> Self {
        DisplayError::Frame
    }
}

/// Something that can show a [`RenderFrame`]
///
/// Called once per render cycle from the render task. Implementations
/// decide how to draw or where to forward the frame; they must not keep a
/// reference to it.
pub trait DashDisplay {
    /// Present one frame
    fn present(&mut self, frame: &RenderFrame) -> impl Future<Output = Result<(), DisplayError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashConfig;
    use crate::state::DisplayMode;
    use crate::telemetry::TelemetryValues;
    use embassy_futures::block_on;

    /// Remembers the last frame it was shown
    #[derive(Default)]
    struct Recorder {
        last: Option<RenderFrame>,
        count: usize,
    }

    impl DashDisplay for Recorder {
        async fn present(&mut self, frame: &RenderFrame) -> Result<(), DisplayError> {
            self.last = Some(*frame);
            self.count += 1;
            Ok(())
        }
    }

    #[test]
    fn test_present_through_trait() {
        let mut display = Recorder::default();
        let frame = RenderFrame::build(
            TelemetryValues::default(),
            DisplayMode::default(),
            true,
            false,
            &DashConfig::default(),
        );
        block_on(display.present(&frame)).unwrap();
        assert_eq!(display.last, Some(frame));
        assert_eq!(display.count, 1);
    }

    #[test]
    fn test_link_error_maps_to_frame() {
        let e: DisplayError = candash_protocol::LinkError::Oversize.into();
        assert_eq!(e, DisplayError::Frame);
    }
}
