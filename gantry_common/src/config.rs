//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the TOML configuration
//! shared by the gantry binaries. Every section carries defaults, so an
//! empty file describes the reference deployment on the simulation driver.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gantry_common::config::{load_config, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = load_config(Path::new("config/gantry.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::consts::{MAX_AXES, PIXEL_COUNT, PLAYBACK_LINE_DELAY_MS};
use crate::hal::config::DriverConfig;
use crate::motion::axis::AxisGroup;
use crate::motion::config::{ControlConfig, MechanicsConfig};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared across the gantry binaries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "gantry-bench-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "gantry".to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// File playback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Delay between consecutive lines [ms]. Independent of the control period.
    pub line_delay_ms: u64,
    /// Interpreter failure policy name (`"strict"` or `"permissive"`).
    pub failure_policy: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            line_delay_ms: PLAYBACK_LINE_DELAY_MS,
            failure_policy: "permissive".to_string(),
        }
    }
}

impl PlaybackConfig {
    /// Inter-line delay as Duration.
    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }
}

/// Interactive console settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Interpreter failure policy name for G-code typed at the console.
    pub failure_policy: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            failure_policy: "strict".to_string(),
        }
    }
}

/// Indicator pixel strip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PixelConfig {
    /// Number of addressable elements on the strip.
    pub count: usize,
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self { count: PIXEL_COUNT }
    }
}

/// Complete gantry configuration, one TOML file.
///
/// # TOML Example
///
/// ```toml
/// [mechanics]
/// lead_mm = 8.0
///
/// [control]
/// cycle_time_ms = 10
///
/// [control.y]
/// kp = 10.0
/// deadband = 0.3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GantryConfig {
    /// Shared service settings.
    pub shared: SharedConfig,
    /// Lead-screw mechanics.
    pub mechanics: MechanicsConfig,
    /// Control loop timing and per-group gains.
    pub control: ControlConfig,
    /// Motor driver selection and electrical configuration.
    pub driver: DriverConfig,
    /// File playback pacing and policy.
    pub playback: PlaybackConfig,
    /// Interactive console policy.
    pub console: ConsoleConfig,
    /// Indicator pixel strip.
    pub pixels: PixelConfig,
}

impl GantryConfig {
    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.mechanics.validate()?;
        self.control.validate()?;
        self.driver.validate()?;

        if self.driver.axes.len() > MAX_AXES {
            return Err(ConfigError::ValidationError(format!(
                "Too many axes: {} (max {})",
                self.driver.axes.len(),
                MAX_AXES
            )));
        }

        for group in AxisGroup::ALL {
            if !self.driver.axes.iter().any(|a| a.group == group) {
                return Err(ConfigError::ValidationError(format!(
                    "No axis assigned to group {group}"
                )));
            }
        }

        if self.playback.failure_policy.is_empty() || self.console.failure_policy.is_empty() {
            return Err(ConfigError::ValidationError(
                "failure_policy cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Load and validate a [`GantryConfig`].
pub fn load_config(path: &Path) -> Result<GantryConfig, ConfigError> {
    let config = GantryConfig::load(path)?;
    config.validate()?;
    tracing::debug!(
        path = %path.display(),
        driver = %config.driver.name,
        axes = config.driver.axes.len(),
        "Configuration loaded"
    );
    Ok(config)
}
