//! Motor driver trait and error types.
//!
//! This module defines:
//! - `MotorDriver` trait - Interface for pluggable motor drivers
//! - `HalError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type

use std::time::Duration;
use thiserror::Error;

use crate::hal::config::{DriverConfig, VelocityGains};

/// Error types for driver operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Channel not present on this driver
    #[error("Invalid channel: {0}")]
    InvalidChannel(u8),

    /// Operation attempted before `connect()`
    #[error("Driver not connected")]
    NotConnected,
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn MotorDriver>;

/// Interface to a multi-channel motor driver running in velocity mode.
///
/// Positions are shaft angles in radians, velocities in rad/s.
///
/// # Lifecycle
///
/// 1. `configure()` - Called once with the driver section of the config
/// 2. `connect()` - Opens the hardware link (or simulation state)
/// 3. `set_velocity_gains()` - Once per channel
/// 4. `poll()` / `position()` / `set_velocity()` - Every control tick
/// 5. `shutdown()` - Best effort on exit
pub trait MotorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Apply voltage limits and the channel map.
    ///
    /// # Errors
    /// `HalError::ConfigError` if the driver cannot serve the configuration.
    fn configure(&mut self, config: &DriverConfig) -> Result<(), HalError>;

    /// Open the connection. Reads and writes fail with `NotConnected` before this.
    fn connect(&mut self) -> Result<(), HalError>;

    /// Program the inner velocity loop of one channel.
    fn set_velocity_gains(&mut self, channel: u8, gains: &VelocityGains) -> Result<(), HalError>;

    /// Advance the driver by `dt`. Called once per control tick before reads.
    ///
    /// Hardware drivers that are updated asynchronously keep the default.
    fn poll(&mut self, _dt: Duration) -> Result<(), HalError> {
        Ok(())
    }

    /// Current shaft angle of a channel [rad].
    fn position(&self, channel: u8) -> Result<f64, HalError>;

    /// Command a shaft velocity on a channel [rad/s].
    fn set_velocity(&mut self, channel: u8, velocity: f64) -> Result<(), HalError>;

    /// Release the hardware. Default: no-op.
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullDriver;

    impl MotorDriver for NullDriver {
        fn name(&self) -> &'static str {
            "null"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }

        fn configure(&mut self, _config: &DriverConfig) -> Result<(), HalError> {
            Ok(())
        }

        fn connect(&mut self) -> Result<(), HalError> {
            Ok(())
        }

        fn set_velocity_gains(&mut self, _channel: u8, _gains: &VelocityGains) -> Result<(), HalError> {
            Ok(())
        }

        fn position(&self, channel: u8) -> Result<f64, HalError> {
            Err(HalError::InvalidChannel(channel))
        }

        fn set_velocity(&mut self, _channel: u8, _velocity: f64) -> Result<(), HalError> {
            Err(HalError::NotConnected)
        }
    }

    #[test]
    fn test_hal_error_display() {
        let err = HalError::InitFailed("test error".to_string());
        assert!(err.to_string().contains("test error"));

        let err = HalError::DriverNotFound("simulation".to_string());
        assert!(err.to_string().contains("simulation"));

        assert_eq!(HalError::InvalidChannel(9).to_string(), "Invalid channel: 9");
    }

    #[test]
    fn test_default_methods() {
        let factory: DriverFactory = || Box::new(NullDriver);
        let mut driver = factory();
        assert!(driver.poll(Duration::from_millis(10)).is_ok());
        assert!(driver.shutdown().is_ok());
        assert_eq!(driver.position(4), Err(HalError::InvalidChannel(4)));
    }
}
