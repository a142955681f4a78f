//! candash - CAN telemetry dashboard firmware
//!
//! Main firmware binary for RP2040-based dashboards. A wireless bridge on
//! UART0 relays raw CAN frames from the car; this firmware decodes the
//! signals the driver cares about and streams a clamped render frame to
//! the display unit on UART1.
//!
//! Task roles:
//! - `link_rx_task` (or `mock_task`): producer, writes the telemetry snapshot
//! - `button_task` x2: advance the display mode
//! - `alarm_tick_task`: blinks the oil pressure alarm
//! - `render_task`: consumer, presents frames and persists the mode

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{
    BufferedInterruptHandler, Config as UartConfig, InterruptHandler as UartInterruptHandler, Uart,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use candash_core::config::{DashConfig, DataSource};
use candash_core::state::{InputEvent, ModePersistence, RestoreOutcome};
use candash_core::Dashboard;
use candash_hal_rp2040::flash::FlashStorage;

use crate::display::UartDisplay;

mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => UartInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Shared state and configuration, referenced by every task
static DASHBOARD: StaticCell<Dashboard> = StaticCell::new();
static CONFIG: StaticCell<DashConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("candash firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static DashConfig = CONFIG.init(config::load());
    let dash: &'static Dashboard = DASHBOARD.init(Dashboard::default());

    // Restore the display mode before any button can change it
    let storage = FlashStorage::new(p.FLASH, p.DMA_CH2);
    let (persistence, outcome) = ModePersistence::restore(storage, &dash.mode).await;
    log_restore(outcome);

    // Setup UART1 for the display unit
    // Pin assignments are board-specific (TX=GPIO4, RX=GPIO5)
    let display_uart = Uart::new(
        p.UART1,
        p.PIN_4,
        p.PIN_5,
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        UartConfig::default(),
    );
    let (display_tx, _display_rx) = display_uart.split();
    let display = UartDisplay::new(display_tx);
    info!("Display UART initialized");

    // Mode buttons (GPIO14 layout, GPIO15 oil pressure channel), active low
    let layout_button = Input::new(p.PIN_14, Pull::Up);
    let metric_button = Input::new(p.PIN_15, Pull::Up);
    let lockout_ms = config.timing.input_lockout_ms;

    // Spawn tasks
    match config.source {
        DataSource::Link => {
            // Setup UART0 for the wireless bridge (115200 baud default)
            let tx_buf = TX_BUF.init([0u8; 64]);
            let rx_buf = RX_BUF.init([0u8; 256]);
            let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
            let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
            let (_tx, rx) = uart.split();
            info!("Bridge UART initialized");

            spawner.spawn(tasks::link_rx_task(rx, dash)).unwrap();
        }
        DataSource::Mock => {
            spawner
                .spawn(tasks::mock_task(dash, config.timing.mock_step_ms))
                .unwrap();
        }
    }
    spawner
        .spawn(tasks::button_task(
            layout_button,
            InputEvent::AdvanceLayout,
            dash,
            lockout_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::button_task(
            metric_button,
            InputEvent::AdvanceSecondaryMetric,
            dash,
            lockout_ms,
        ))
        .unwrap();
    spawner.spawn(tasks::alarm_tick_task(dash, config)).unwrap();
    spawner
        .spawn(tasks::render_task(dash, config, persistence, display))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Log what startup restore found in flash
fn log_restore(outcome: RestoreOutcome) {
    match outcome {
        RestoreOutcome::Restored(mode) => info!("Display mode restored: {:?}", mode),
        RestoreOutcome::Defaulted { written } => {
            info!("No stored display mode, using default");
            if let Err(e) = written {
                warn!("Failed to store default display mode: {:?}", e);
            }
        }
        RestoreOutcome::Corrupted { error, written } => {
            warn!("Stored display mode corrupt ({:?}), reset to default", error);
            if let Err(e) = written {
                warn!("Failed to store default display mode: {:?}", e);
            }
        }
    }
}
