//! System-wide constants for the gantry workspace.
//!
//! Single source of truth for numeric limits and defaults.

/// Maximum number of physical motor axes driven by one control loop.
pub const MAX_AXES: usize = 8;

/// Default control loop period in milliseconds (100 Hz).
pub const CYCLE_TIME_MS: u64 = 10;

/// Default settle interval before the zero reference is captured.
pub const SETTLE_TIME_MS: u64 = 2000;

/// Default lead of the screw in millimeters per revolution.
pub const LEAD_MM: f64 = 8.0;

/// Default delay between consecutive lines of file playback.
pub const PLAYBACK_LINE_DELAY_MS: u64 = 100;

/// Default number of addressable pixels on the indicator strip.
pub const PIXEL_COUNT: usize = 8;

/// Default supply voltage of the motor controller board.
pub const SUPPLY_VOLTAGE: f64 = 12.0;

/// Default number of control ticks between status log lines.
pub const STATUS_INTERVAL: u64 = 100;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/gantry.toml";
