//! Render task
//!
//! The consumer side. Every cycle it copies and clamps the telemetry, hands
//! the frame to the display, then persists the display mode if it changed.
//! It is the only task that touches flash.

use defmt::*;
use embassy_time::{Duration, Ticker};

use candash_core::config::DashConfig;
use candash_core::state::{ModePersistence, SyncOutcome};
use candash_core::traits::DashDisplay;
use candash_core::Dashboard;
use candash_hal_rp2040::flash::FlashStorage;

use crate::display::UartDisplay;

#[embassy_executor::task]
pub async fn render_task(
    dash: &'static Dashboard,
    config: &'static DashConfig,
    mut persistence: ModePersistence<FlashStorage<'static>>,
    mut display: UartDisplay,
) {
    info!("Render task started");

    let period = Duration::from_millis(u64::from(config.timing.render_period_ms));
    let mut ticker = Ticker::every(period);
    let mut display_ok = true;

    loop {
        ticker.next().await;

        let frame = dash.render_frame(config);
        match display.present(&frame).await {
            Ok(()) => {
                if !display_ok {
                    info!("Display link recovered");
                }
                display_ok = true;
            }
            Err(e) => {
                // Report once per outage, not every 10 ms
                if display_ok {
                    warn!("Failed to present frame: {:?}", e);
                }
                display_ok = false;
            }
        }

        match persistence.sync(&dash.mode).await {
            SyncOutcome::Unchanged => {}
            SyncOutcome::Persisted(mode) => info!("Saved display mode {:?}", mode),
            SyncOutcome::Failed(e) => warn!("Failed to save display mode: {:?}", e),
        }
    }
}
