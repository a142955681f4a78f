//! Minimal TOML parser for `dash.toml`
//!
//! Handles only the subset the dashboard configuration uses and never
//! allocates. Keys that are absent keep their defaults.
//!
//! Supported:
//! - `key = value` pairs (integer, string)
//! - Integer arrays on one line: `thresholds = [4700, 5100]`
//! - `[section]` headers
//! - Comments (`# ...`), on their own line or trailing
//! - `_` digit separators in integers
//!
//! Everything else (multi-line values, inline tables, dotted keys, floats)
//! is rejected with the offending line number.

use super::types::{Bounds, ConfigError, DashConfig, DataSource, SHIFT_STAGES};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is neither a header, a `key = value` pair nor a comment
    Syntax { line: u32 },
    /// Section header names no known section
    UnknownSection { line: u32 },
    /// Key is not valid in the current section
    UnknownKey { line: u32 },
    /// Value has the wrong type or is out of range
    InvalidValue { line: u32 },
    /// Parsed, but the values contradict each other
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Clamp,
    Shift,
    OilAlarm,
    Severity,
    Timing,
}

/// Parse `dash.toml` text into a validated [`DashConfig`]
pub fn parse(input: &str) -> Result<DashConfig, ParseError> {
    let mut config = DashConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = (index + 1) as u32;
        let text = strip_comment(raw).trim();

        if text.is_empty() {
            continue;
        }

        if let Some(header) = text.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::Syntax { line })?;
            section = parse_section_header(name.trim()).ok_or(ParseError::UnknownSection { line })?;
            continue;
        }

        let (key, value) = split_key_value(text).ok_or(ParseError::Syntax { line })?;
        apply_value(&mut config, section, key, value, line)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "clamp" => Some(Section::Clamp),
        "shift" => Some(Section::Shift),
        "oil_alarm" => Some(Section::OilAlarm),
        "severity" => Some(Section::Severity),
        "timing" => Some(Section::Timing),
        _ => None,
    }
}

fn apply_value(
    config: &mut DashConfig,
    section: Section,
    key: &str,
    value: &str,
    line: u32,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };
    let int = || parse_int(value).ok_or(invalid);
    let period = || {
        parse_int(value)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(invalid)
    };

    match (section, key) {
        (Section::Root, "source") => {
            config.source = match parse_string(value).ok_or(invalid)? {
                "link" => DataSource::Link,
                "mock" => DataSource::Mock,
                _ => return Err(invalid),
            };
        }

        (Section::Clamp, _) => {
            let limits = &mut config.clamp;
            let (bounds, is_min): (&mut Bounds, bool) = match key {
                "rpm_min" => (&mut limits.rpm, true),
                "rpm_max" => (&mut limits.rpm, false),
                "oil_pressure_min" => (&mut limits.oil_pressure, true),
                "oil_pressure_max" => (&mut limits.oil_pressure, false),
                "temperature_min" => (&mut limits.temperature, true),
                "temperature_max" => (&mut limits.temperature, false),
                "percent_min" => (&mut limits.percent, true),
                "percent_max" => (&mut limits.percent, false),
                "steering_min" => (&mut limits.steering, true),
                "steering_max" => (&mut limits.steering, false),
                _ => return Err(ParseError::UnknownKey { line }),
            };
            if is_min {
                bounds.min = int()?;
            } else {
                bounds.max = int()?;
            }
        }

        (Section::Shift, "thresholds") => {
            config.shift.thresholds = parse_int_array(value).ok_or(invalid)?;
        }

        (Section::OilAlarm, "min_rpm") => config.oil_alarm.min_rpm = int()?,
        (Section::OilAlarm, "min_pressure") => config.oil_alarm.min_pressure = int()?,

        (Section::Severity, "oil_pressure_warning") => {
            config.severity.oil_pressure_warning = int()?
        }
        (Section::Severity, "oil_pressure_critical") => {
            config.severity.oil_pressure_critical = int()?
        }
        (Section::Severity, "temperature_warning") => config.severity.temperature_warning = int()?,
        (Section::Severity, "temperature_critical") => {
            config.severity.temperature_critical = int()?
        }

        (Section::Timing, "render_period_ms") => config.timing.render_period_ms = period()?,
        (Section::Timing, "alarm_tick_ms") => config.timing.alarm_tick_ms = period()?,
        (Section::Timing, "input_lockout_ms") => config.timing.input_lockout_ms = period()?,
        (Section::Timing, "mock_step_ms") => config.timing.mock_step_ms = period()?,

        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}

/// Cut a trailing `#` comment, ignoring `#` inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    let bare = key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if key.is_empty() || value.is_empty() || !bare {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    if inner.contains('"') || inner.contains('\\') {
        return None;
    }
    Some(inner)
}

/// Decimal integer with optional sign and `_` separators between digits
fn parse_int(value: &str) -> Option<i32> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut magnitude: i64 = 0;
    for b in digits.bytes() {
        match b {
            b'_' => continue,
            b'0'..=b'9' => {
                magnitude = magnitude.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
                if magnitude > i64::from(u32::MAX) {
                    return None;
                }
            }
            _ => return None,
        }
    }

    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed).ok()
}

fn parse_int_array(value: &str) -> Option<[i32; SHIFT_STAGES]> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?.trim();
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    let mut out = [0i32; SHIFT_STAGES];
    let mut count = 0;
    for item in inner.split(',') {
        let slot = out.get_mut(count)?;
        *slot = parse_int(item.trim())?;
        count += 1;
    }
    (count == SHIFT_STAGES).then_some(out)
}
