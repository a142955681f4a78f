//! Build script for candash-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates dash.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section ("" is the root table)
const SCHEMA: &[(&str, &[&str])] = &[
    ("", &["source"]),
    (
        "clamp",
        &[
            "rpm_min",
            "rpm_max",
            "oil_pressure_min",
            "oil_pressure_max",
            "temperature_min",
            "temperature_max",
            "percent_min",
            "percent_max",
            "steering_min",
            "steering_max",
        ],
    ),
    ("shift", &["thresholds"]),
    ("oil_alarm", &["min_rpm", "min_pressure"]),
    (
        "severity",
        &[
            "oil_pressure_warning",
            "oil_pressure_critical",
            "temperature_warning",
            "temperature_critical",
        ],
    ),
    (
        "timing",
        &[
            "render_period_ms",
            "alarm_tick_ms",
            "input_lockout_ms",
            "mock_step_ms",
        ],
    ),
];

/// Number of shift light thresholds
const SHIFT_STAGES: usize = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate dash.toml at compile time
///
/// Catches what the on-device parser would otherwise only report at boot
/// (and then silently replace with defaults).
fn validate_config() {
    println!("cargo:rerun-if-changed=dash.toml");

    let config_path = Path::new("dash.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: dash.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds dash.toml as its configuration.             ║\n\
            ║  Please create one in the candash-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read dash.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in dash.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    validate_source(&config, &mut errors);
    validate_clamp(&config, &mut errors);
    validate_shift(&config, &mut errors);
    validate_severity(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid dash.toml configuration                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=dash.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section_keys(name: &str) -> Option<&'static [&'static str]> {
    SCHEMA.iter().find(|(s, _)| *s == name).map(|(_, keys)| *keys)
}

/// Only known sections and keys; every value but `source` and the shift
/// thresholds must be an integer
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (key, value) in root {
        match value {
            toml::Value::Table(table) => {
                let Some(allowed) = section_keys(key) else {
                    errors.push(format!("unknown section [{}]", key));
                    continue;
                };
                for (field, v) in table {
                    if !allowed.contains(&field.as_str()) {
                        errors.push(format!("[{}] unknown key '{}'", key, field));
                    } else if field != "thresholds" && !v.is_integer() {
                        errors.push(format!("[{}] '{}' must be an integer", key, field));
                    } else if v.as_integer().is_some_and(|n| i32::try_from(n).is_err()) {
                        errors.push(format!("[{}] '{}' does not fit in 32 bits", key, field));
                    }
                }
            }
            _ => {
                if !section_keys("").is_some_and(|k| k.contains(&key.as_str())) {
                    errors.push(format!("unknown top-level key '{}'", key));
                }
            }
        }
    }
}

fn validate_source(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("source") {
        None => {}
        Some(toml::Value::String(s)) if s == "link" || s == "mock" => {}
        Some(_) => errors.push("source must be \"link\" or \"mock\"".to_string()),
    }
}

fn validate_clamp(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(clamp) = config.get("clamp").and_then(|c| c.as_table()) else {
        return;
    };

    // (field, default min, default max)
    let ranges = [
        ("rpm", 0, 9999),
        ("oil_pressure", 0, 200),
        ("temperature", 0, 300),
        ("percent", 0, 100),
        ("steering", -900, 900),
    ];
    for (field, default_min, default_max) in ranges {
        let bound = |suffix: &str, default: i64| {
            clamp
                .get(&format!("{}_{}", field, suffix))
                .and_then(|v| v.as_integer())
                .unwrap_or(default)
        };
        if bound("min", default_min) > bound("max", default_max) {
            errors.push(format!("[clamp] {}_min is above {}_max", field, field));
        }
    }
}

fn validate_shift(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(thresholds) = config.get("shift").and_then(|s| s.get("thresholds")) else {
        return;
    };

    let Some(values) = thresholds.as_array() else {
        errors.push("[shift] thresholds must be an array".to_string());
        return;
    };
    if values.len() != SHIFT_STAGES {
        errors.push(format!("[shift] thresholds needs {} entries", SHIFT_STAGES));
        return;
    }

    let ints: Vec<i64> = values.iter().filter_map(|v| v.as_integer()).collect();
    if ints.len() != values.len() {
        errors.push("[shift] thresholds must be integers".to_string());
    } else if ints.iter().any(|&n| i32::try_from(n).is_err()) {
        errors.push("[shift] thresholds must fit in 32 bits".to_string());
    } else if !ints.windows(2).all(|w| w[0] < w[1]) {
        errors.push("[shift] thresholds must be strictly increasing".to_string());
    }
}

/// Critical must be at or past warning: lower for pressure, higher for temperature
fn validate_severity(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(severity) = config.get("severity").and_then(|s| s.as_table()) else {
        return;
    };

    // Defaults for keys the file leaves out
    let value = |key: &str, default: i64| {
        severity
            .get(key)
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };

    if value("oil_pressure_critical", 10) > value("oil_pressure_warning", 30) {
        errors.push("[severity] oil_pressure_critical is above oil_pressure_warning".to_string());
    }
    if value("temperature_critical", 260) < value("temperature_warning", 240) {
        errors.push("[severity] temperature_critical is below temperature_warning".to_string());
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in timing {
        if let Some(ms) = value.as_integer() {
            if ms < 0 || (ms == 0 && key != "input_lockout_ms") {
                errors.push(format!("[timing] {} must be positive", key));
            }
        }
    }
}
