//! Oil alarm tick
//!
//! Runs slower than the render loop so the inverted-colour blink is visible.

use defmt::*;
use embassy_time::{Duration, Ticker};

use candash_core::config::DashConfig;
use candash_core::Dashboard;

#[embassy_executor::task]
pub async fn alarm_tick_task(dash: &'static Dashboard, config: &'static DashConfig) {
    info!("Alarm tick task started");

    let period = Duration::from_millis(u64::from(config.timing.alarm_tick_ms));
    let mut ticker = Ticker::every(period);
    let mut last_inverted = false;
    let mut was_active = false;

    loop {
        ticker.next().await;

        let inverted = dash.tick_alarm(config);
        trace!("Alarm tick: inverted={}", inverted);

        // The flag alternates while the alarm holds, so look at two ticks
        let active = inverted || last_inverted;
        if active && !was_active {
            warn!("Low oil pressure under load");
        } else if !active && was_active {
            info!("Oil pressure alarm cleared");
        }
        last_inverted = inverted;
        was_active = active;
    }
}
