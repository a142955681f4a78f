//! Mock data source
//!
//! Replaces the link task when `source = "mock"`.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use candash_core::telemetry::MockSweep;
use candash_core::Dashboard;

/// Settle time before the first sample, so the connecting screen shows
const STARTUP_DELAY_MS: u64 = 300;

#[embassy_executor::task]
pub async fn mock_task(dash: &'static Dashboard, step_ms: u32) {
    warn!("Mock data task started, no bridge in use");

    Timer::after_millis(STARTUP_DELAY_MS).await;
    dash.link.mark_connected();

    let mut sweep = MockSweep::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(step_ms)));

    loop {
        sweep.step(&dash.telemetry);
        ticker.next().await;
    }
}
