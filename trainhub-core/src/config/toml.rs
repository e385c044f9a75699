//! Minimal TOML parser for the hub configuration
//!
//! Handles only the subset `hub.toml` uses and needs no allocation:
//!
//! - `[control]`, `[button]` and `[remote]` section headers
//! - `key = value` pairs with integer or quoted string values
//! - Integers with `_` digit separators
//! - Comments (`# ...`), full-line or trailing
//!
//! Keys that are not given keep their defaults. Unknown sections and keys
//! are errors so a typo does not silently fall back to a default.

use trainhub_hal::Color;

use super::types::{ConfigError, ControlConfig, StopBehavior};

/// Parse error, with the 1-based line it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is neither a header nor a `key = value` pair
    Syntax { line: usize },
    UnknownSection { line: usize },
    UnknownKey { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
    /// Values parsed but are inconsistent
    Invalid(ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Control,
    Button,
    Remote,
}

/// Parse a configuration file into a validated [`ControlConfig`]
pub fn parse_config(input: &str) -> Result<ControlConfig, ParseError> {
    let mut config = ControlConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        if let Some(header) = text.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::Syntax { line })?
                .trim();
            section = match name {
                "control" => Section::Control,
                "button" => Section::Button,
                "remote" => Section::Remote,
                _ => return Err(ParseError::UnknownSection { line }),
            };
            continue;
        }

        let (key, value) = split_key_value(text).ok_or(ParseError::Syntax { line })?;
        apply(&mut config, section, key, value).map_err(|e| e.at(line))?;
    }

    config.validate().map_err(ParseError::Invalid)?;
    Ok(config)
}

/// Failure of a single assignment, before the line number is known
enum ValueError {
    UnknownKey,
    Invalid,
}

impl ValueError {
    fn at(self, line: usize) -> ParseError {
        match self {
            ValueError::UnknownKey => ParseError::UnknownKey { line },
            ValueError::Invalid => ParseError::InvalidValue { line },
        }
    }
}

fn apply(
    config: &mut ControlConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ValueError> {
    match (section, key) {
        (Section::Control, "tick_ms") => config.tick_ms = parse_int(value)?,
        (Section::Control, "step") => config.step = parse_int(value)?,
        (Section::Control, "stop_behavior") => {
            config.stop_behavior =
                StopBehavior::from_name(parse_string(value)?).ok_or(ValueError::Invalid)?
        }
        (Section::Button, "short_press_ms") => config.press.short_max_ms = parse_int(value)?,
        (Section::Button, "stop_press_ms") => config.press.stop_max_ms = parse_int(value)?,
        (Section::Button, "power_off_ms") => config.press.power_off_ms = parse_int(value)?,
        (Section::Remote, "retry_interval_ms") => {
            config.remote.retry_interval_ms = parse_int(value)?
        }
        (Section::Remote, "search_timeout_ms") => {
            config.remote.search_timeout_ms = parse_int(value)?
        }
        (Section::Remote, "indicator") => {
            config.indicator = Color::from_name(parse_string(value)?).ok_or(ValueError::Invalid)?
        }
        _ => return Err(ValueError::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ValueError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|v| !v.contains('"'))
        .ok_or(ValueError::Invalid)
}

/// Parse an unsigned integer, accepting `_` between digits
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ValueError> {
    if value.starts_with('_') || value.ends_with('_') || value.contains("__") {
        return Err(ValueError::Invalid);
    }
    let mut acc: u64 = 0;
    let mut digits = 0;
    for c in value.chars().filter(|c| *c != '_') {
        let d = c.to_digit(10).ok_or(ValueError::Invalid)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(u64::from(d)))
            .ok_or(ValueError::Invalid)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ValueError::Invalid);
    }
    T::try_from(acc).map_err(|_| ValueError::Invalid)
}
