//! Configuration file tests.
//!
//! Full-file loading: section overrides, per-axis channel maps, rejection of
//! unknown fields and of electrically impossible limits.

use gantry_common::config::{ConfigError, load_config};
use gantry_common::motion::axis::AxisGroup;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("gantry.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_file_overrides() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        r#"
[shared]
log_level = "debug"
service_name = "bench-01"

[mechanics]
lead_mm = 5.0

[control]
cycle_time_ms = 20
status_interval = 10

[control.x]
kp = 10.0
deadband = 0.3

[driver]
supply_voltage = 24.0

[[driver.axes]]
name = "left"
channel = 4
group = "x"
voltage_limit = 20.0

[[driver.axes]]
name = "cross"
channel = 5
group = "y"
velocity_gains = { kp = 8.0 }

[playback]
line_delay_ms = 0
failure_policy = "strict"

[pixels]
count = 16
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.shared.service_name, "bench-01");
    assert_eq!(config.mechanics.lead_mm, 5.0);
    assert_eq!(config.control.cycle_time_ms, 20);
    assert_eq!(config.control.gains(AxisGroup::X).kp, 10.0);
    assert_eq!(config.control.gains(AxisGroup::Y).kp, 5.0);
    assert_eq!(config.driver.axes.len(), 2);
    assert_eq!(config.driver.axis(5).unwrap().velocity_gains.kp, 8.0);
    assert_eq!(config.playback.line_delay_ms, 0);
    assert_eq!(config.playback.failure_policy, "strict");
    assert_eq!(config.console.failure_policy, "strict");
    assert_eq!(config.pixels.count, 16);
}

#[test]
fn test_unknown_field_in_section_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "[control]\nki = 1.0\n");
    assert!(matches!(load_config(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_negative_lead_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "[mechanics]\nlead_mm = -8.0\n");
    assert!(matches!(
        load_config(&path),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_voltage_limit_above_supply_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        r#"
[[driver.axes]]
name = "X"
channel = 1
group = "x"
voltage_limit = 48.0

[[driver.axes]]
name = "Y"
channel = 2
group = "y"
"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("voltage_limit"));
}

#[test]
fn test_too_many_axes_rejected() {
    let dir = TempDir::new().unwrap();
    let mut content = String::new();
    for ch in 1..=9u8 {
        let group = if ch % 2 == 0 { "y" } else { "x" };
        content.push_str(&format!(
            "[[driver.axes]]\nname = \"m{ch}\"\nchannel = {ch}\ngroup = \"{group}\"\n\n"
        ));
    }
    let path = write(&dir, &content);
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Too many axes"));
}
