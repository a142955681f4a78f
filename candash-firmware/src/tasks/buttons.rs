//! Mode buttons
//!
//! One task per button. A press applies its event immediately; the flash
//! write happens later on the render task, so a button never waits on
//! storage.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use candash_core::state::InputEvent;
use candash_core::Dashboard;

/// Button task - active-low push button with pull-up
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(
    mut pin: Input<'static>,
    event: InputEvent,
    dash: &'static Dashboard,
    lockout_ms: u32,
) {
    info!("Button task started for {:?}", event);

    loop {
        pin.wait_for_falling_edge().await;

        let mode = dash.on_input(event);
        debug!("{:?} -> {:?}", event, mode);

        // Swallow contact bounce and repeat presses
        Timer::after_millis(u64::from(lockout_ms)).await;
        pin.wait_for_high().await;
    }
}
