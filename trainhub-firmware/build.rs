//! Build script for trainhub-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates hub.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section of hub.toml
const SECTIONS: &[(&str, &[&str])] = &[
    ("control", &["tick_ms", "step", "stop_behavior"]),
    (
        "button",
        &["short_press_ms", "stop_press_ms", "power_off_ms"],
    ),
    (
        "remote",
        &["retry_interval_ms", "search_timeout_ms", "indicator"],
    ),
];

const COLORS: &[&str] = &["off", "green", "red", "blue", "yellow", "white"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate hub.toml at compile time
///
/// The firmware falls back to stock values when its own parser rejects the
/// file, so mistakes are caught here instead of silently on the device.
fn validate_config() {
    println!("cargo:rerun-if-changed=hub.toml");

    let config_path = Path::new("hub.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: hub.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds hub.toml from the trainhub-firmware         ║\n\
            ║  directory. An empty file selects the stock configuration.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read hub.toml                                  ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in hub.toml                          ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    check_layout(&config, &mut errors);
    check_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid hub.toml configuration                           ║\n\
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

    println!("cargo:warning=hub.toml validated successfully");
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

/// Only known sections and keys may appear
fn check_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for key in body.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn integer(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match get(config, section, key)? {
        toml::Value::Integer(v) if *v >= 0 && *v <= i64::from(u32::MAX) => Some(*v),
        _ => {
            errors.push(format!("[{}] {} must be a non-negative integer", section, key));
            None
        }
    }
}

/// Value ranges and the ordering of the press thresholds
fn check_values(config: &toml::Value, errors: &mut Vec<String>) {
    if integer(config, "control", "tick_ms", errors) == Some(0) {
        errors.push("[control] tick_ms must be greater than 0".to_string());
    }
    if let Some(step) = integer(config, "control", "step", errors) {
        if !(1..=100).contains(&step) {
            errors.push("[control] step must be 1-100".to_string());
        }
    }
    if let Some(value) = get(config, "control", "stop_behavior") {
        if !matches!(value.as_str(), Some("pause") | Some("exit")) {
            errors.push("[control] stop_behavior must be 'pause' or 'exit'".to_string());
        }
    }

    let short = integer(config, "button", "short_press_ms", errors).unwrap_or(1_500);
    let stop = integer(config, "button", "stop_press_ms", errors).unwrap_or(4_500);
    let off = integer(config, "button", "power_off_ms", errors).unwrap_or(5_000);
    if !(short < stop && stop <= off) {
        errors.push("[button] need short_press_ms < stop_press_ms <= power_off_ms".to_string());
    }

    if integer(config, "remote", "retry_interval_ms", errors) == Some(0) {
        errors.push("[remote] retry_interval_ms must be greater than 0".to_string());
    }
    if integer(config, "remote", "search_timeout_ms", errors) == Some(0) {
        errors.push("[remote] search_timeout_ms must be greater than 0".to_string());
    }
    if let Some(value) = get(config, "remote", "indicator") {
        if !value.as_str().is_some_and(|c| COLORS.contains(&c)) {
            errors.push(format!("[remote] indicator must be one of {}", COLORS.join(", ")));
        }
    }
}
