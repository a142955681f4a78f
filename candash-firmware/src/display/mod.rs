//! Display unit link
//!
//! The panel is driven by a separate display unit on UART1. Each render
//! cycle we postcard-encode the frame and wrap it in a link envelope; the
//! unit redraws from that alone.

use embassy_rp::uart::{Async, UartTx};

use candash_core::render::{encode_frame, RenderFrame, MAX_ENCODED_FRAME};
use candash_core::traits::{DashDisplay, DisplayError};
use candash_protocol::link::{self, LinkPacket, MAX_LINK_FRAME};

/// Render frames to an external display unit over UART
pub struct UartDisplay {
    tx: UartTx<'static, Async>,
}

impl UartDisplay {
    pub fn new(tx: UartTx<'static, Async>) -> Self {
        Self { tx }
    }
}

impl DashDisplay for UartDisplay {
    async fn present(&mut self, frame: &RenderFrame) -> Result<(), DisplayError> {
        let mut payload = [0u8; MAX_ENCODED_FRAME];
        let payload = encode_frame(frame, &mut payload)?;

        let mut out = [0u8; MAX_LINK_FRAME];
        let len = link::encode(LinkPacket::Render, payload, &mut out)?;

        self.tx
            .write(&out[..len])
            .await
            .map_err(|_| DisplayError::Io)
    }
}
