//! Bridge UART receive task
//!
//! Deframes the byte stream from the wireless bridge and feeds each relay
//! frame to the dashboard. This is the producer side: it never waits on
//! anything but the UART.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use candash_core::{Dashboard, FrameDisposition};
use candash_protocol::{LinkDecoder, LinkError, LinkPacket};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives relay frames from the bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx, dash: &'static Dashboard) {
    info!("Link RX task started");

    let mut decoder = LinkDecoder::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match decoder.push(byte) {
                        Ok(Some((LinkPacket::Relay, frame))) => handle_relay(dash, frame),
                        Ok(Some((packet, _))) => {
                            debug!("Ignoring {:?} packet from bridge", packet);
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(LinkError::Checksum) => {
                            debug!("Link checksum mismatch, frame dropped");
                        }
                        Err(e) => {
                            debug!("Link frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                decoder.reset();
            }
        }
    }
}

fn handle_relay(dash: &Dashboard, frame: &[u8]) {
    let first = !dash.link.is_connected();

    match dash.on_frame(frame) {
        FrameDisposition::Applied(id) => trace!("Frame {:?} applied", id),
        FrameDisposition::Unrecognized(id) => trace!("Frame 0x{:x} not decoded", id),
        FrameDisposition::Discarded => {
            debug!("Short relay frame ({} bytes) discarded", frame.len());
            return;
        }
    }

    if first {
        info!("Bridge connected");
    }
}
