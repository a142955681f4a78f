//! Configuration loading
//!
//! `dash.toml` is compiled into the image; build.rs has already checked it,
//! so a parse failure here means the two validators disagree.

use defmt::*;

use candash_core::config::{parse, DashConfig, DataSource};

/// Embedded configuration (compiled into firmware)
/// Edit dash.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../dash.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> DashConfig {
    match parse(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            DashConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &DashConfig) {
    match config.source {
        DataSource::Link => debug!("  source: bridge link"),
        DataSource::Mock => warn!("  source: MOCK data"),
    }
    debug!(
        "  oil pressure clamp {}..={} psi",
        config.clamp.oil_pressure.min, config.clamp.oil_pressure.max
    );
    debug!(
        "  oil alarm below {} psi above {} rpm",
        config.oil_alarm.min_pressure, config.oil_alarm.min_rpm
    );
    debug!(
        "  render every {} ms, alarm tick {} ms",
        config.timing.render_period_ms, config.timing.alarm_tick_ms
    );
}
