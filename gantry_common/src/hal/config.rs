//! Driver configuration types.
//!
//! - `DriverConfig` - Driver selection, supply and axis channel map
//! - `AxisChannelConfig` - One physical motor and the group it follows
//! - `VelocityGains` - Driver-side velocity loop gains
//! - `SimulationConfig` - Plant model used by the simulation driver

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::ConfigError;
use crate::consts::SUPPLY_VOLTAGE;
use crate::motion::axis::AxisGroup;

fn default_driver_name() -> String {
    "simulation".to_string()
}

fn default_supply_voltage() -> f64 {
    SUPPLY_VOLTAGE
}

fn default_voltage_limit() -> f64 {
    SUPPLY_VOLTAGE
}

/// Gains of the driver's inner velocity loop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VelocityGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl VelocityGains {
    /// Proportional-only gains.
    pub const fn p(kp: f64) -> Self {
        Self {
            kp,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

/// One physical motor.
///
/// # TOML Example
///
/// ```toml
/// [[driver.axes]]
/// name = "X1"
/// channel = 1
/// group = "x"
/// voltage_limit = 12.0
/// velocity_gains = { kp = 5.0, ki = 0.0, kd = 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisChannelConfig {
    /// Display name used in logs.
    pub name: String,
    /// Driver channel number.
    pub channel: u8,
    /// Logical group whose target this motor follows.
    pub group: AxisGroup,
    /// Output voltage limit [V].
    #[serde(default = "default_voltage_limit")]
    pub voltage_limit: f64,
    /// Inner velocity loop gains.
    #[serde(default)]
    pub velocity_gains: VelocityGains,
}

impl AxisChannelConfig {
    fn new(name: &str, channel: u8, group: AxisGroup, kp: f64) -> Self {
        Self {
            name: name.to_string(),
            channel,
            group,
            voltage_limit: SUPPLY_VOLTAGE,
            velocity_gains: VelocityGains::p(kp),
        }
    }
}

/// First-order plant model of the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Time constant of the velocity response [s].
    pub velocity_time_constant_s: f64,
    /// Achievable shaft speed per volt of limit [(rad/s)/V].
    pub velocity_per_volt: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            velocity_time_constant_s: 0.05,
            velocity_per_volt: 2.5,
        }
    }
}

/// Motor driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    /// Registered driver name.
    #[serde(default = "default_driver_name")]
    pub name: String,
    /// Supply voltage [V].
    #[serde(default = "default_supply_voltage")]
    pub supply_voltage: f64,
    /// Physical motors. Two primary motors and one secondary by default.
    #[serde(default = "default_axes")]
    pub axes: Vec<AxisChannelConfig>,
    /// Plant model, only read by the simulation driver.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_axes() -> Vec<AxisChannelConfig> {
    vec![
        AxisChannelConfig::new("X1", 1, AxisGroup::X, 5.0),
        AxisChannelConfig::new("X2", 2, AxisGroup::X, 5.0),
        AxisChannelConfig::new("Y", 3, AxisGroup::Y, 10.0),
    ]
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: default_driver_name(),
            supply_voltage: default_supply_voltage(),
            axes: default_axes(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Axis on the given channel, if any.
    pub fn axis(&self, channel: u8) -> Option<&AxisChannelConfig> {
        self.axes.iter().find(|a| a.channel == channel)
    }

    /// Validate electrical limits and channel uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "driver.name cannot be empty".to_string(),
            ));
        }
        if !self.supply_voltage.is_finite() || self.supply_voltage <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "driver.supply_voltage must be > 0 (got {})",
                self.supply_voltage
            )));
        }
        if self.simulation.velocity_time_constant_s <= 0.0 || self.simulation.velocity_per_volt <= 0.0
        {
            return Err(ConfigError::ValidationError(
                "driver.simulation parameters must be > 0".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut channels = HashSet::new();
        for axis in &self.axes {
            if !names.insert(axis.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate axis name '{}'",
                    axis.name
                )));
            }
            if !channels.insert(axis.channel) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate driver channel {} (axis '{}')",
                    axis.channel, axis.name
                )));
            }
            if !axis.voltage_limit.is_finite()
                || axis.voltage_limit <= 0.0
                || axis.voltage_limit > self.supply_voltage
            {
                return Err(ConfigError::ValidationError(format!(
                    "Axis '{}': voltage_limit {} outside (0, {}]",
                    axis.name, axis.voltage_limit, self.supply_voltage
                )));
            }
        }
        Ok(())
    }
}
