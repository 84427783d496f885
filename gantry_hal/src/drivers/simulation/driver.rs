//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `MotorDriver` trait on top of one
//! [`SimulatedMotor`] per configured channel.

use super::motor::SimulatedMotor;
use gantry_common::hal::config::{DriverConfig, VelocityGains};
use gantry_common::hal::driver::{HalError, MotorDriver};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Simulation driver implementing the MotorDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Connected flag
    connected: bool,
    /// Motors keyed by channel
    motors: BTreeMap<u8, SimulatedMotor>,
}

impl SimulationDriver {
    /// Create a new, unconfigured simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            connected: false,
            motors: BTreeMap::new(),
        }
    }

    /// Whether `connect()` has been called.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Simulated motor on a channel.
    pub fn motor(&self, channel: u8) -> Option<&SimulatedMotor> {
        self.motors.get(&channel)
    }

    /// Mutable simulated motor on a channel.
    pub fn motor_mut(&mut self, channel: u8) -> Option<&mut SimulatedMotor> {
        self.motors.get_mut(&channel)
    }

    fn connected_motor(&self, channel: u8) -> Result<&SimulatedMotor, HalError> {
        if !self.connected {
            return Err(HalError::NotConnected);
        }
        self.motors
            .get(&channel)
            .ok_or(HalError::InvalidChannel(channel))
    }

    fn connected_motor_mut(&mut self, channel: u8) -> Result<&mut SimulatedMotor, HalError> {
        if !self.connected {
            return Err(HalError::NotConnected);
        }
        self.motors
            .get_mut(&channel)
            .ok_or(HalError::InvalidChannel(channel))
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn configure(&mut self, config: &DriverConfig) -> Result<(), HalError> {
        if config.axes.is_empty() {
            return Err(HalError::ConfigError("no axes configured".to_string()));
        }

        self.motors = config
            .axes
            .iter()
            .map(|axis| (axis.channel, SimulatedMotor::new(axis, &config.simulation)))
            .collect();

        info!(
            "Simulation driver configured with {} motors, supply {:.1} V",
            self.motors.len(),
            config.supply_voltage
        );
        Ok(())
    }

    fn connect(&mut self) -> Result<(), HalError> {
        if self.motors.is_empty() {
            return Err(HalError::InitFailed(
                "configure() must be called before connect()".to_string(),
            ));
        }
        self.connected = true;
        info!("Simulation driver connected");
        Ok(())
    }

    fn set_velocity_gains(&mut self, channel: u8, gains: &VelocityGains) -> Result<(), HalError> {
        let motor = self.connected_motor_mut(channel)?;
        motor.set_gains(*gains);
        debug!(
            "Channel {} velocity gains: kp={} ki={} kd={}",
            channel, gains.kp, gains.ki, gains.kd
        );
        Ok(())
    }

    fn poll(&mut self, dt: Duration) -> Result<(), HalError> {
        if !self.connected {
            return Err(HalError::NotConnected);
        }
        for motor in self.motors.values_mut() {
            motor.update(dt);
        }
        Ok(())
    }

    fn position(&self, channel: u8) -> Result<f64, HalError> {
        Ok(self.connected_motor(channel)?.position())
    }

    fn set_velocity(&mut self, channel: u8, velocity: f64) -> Result<(), HalError> {
        self.connected_motor_mut(channel)?.set_command(velocity);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        for motor in self.motors.values_mut() {
            motor.set_command(0.0);
        }
        self.connected = false;
        info!("Simulation driver shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> SimulationDriver {
        let mut d = SimulationDriver::new();
        d.configure(&DriverConfig::default()).unwrap();
        d.connect().unwrap();
        d
    }

    #[test]
    fn reads_fail_before_connect() {
        let mut d = SimulationDriver::new();
        d.configure(&DriverConfig::default()).unwrap();
        assert_eq!(d.position(1), Err(HalError::NotConnected));
        assert_eq!(d.set_velocity(1, 1.0), Err(HalError::NotConnected));
        assert_eq!(d.poll(Duration::from_millis(10)), Err(HalError::NotConnected));
    }

    #[test]
    fn connect_requires_configure() {
        let mut d = SimulationDriver::new();
        assert!(matches!(d.connect(), Err(HalError::InitFailed(_))));
    }

    #[test]
    fn unknown_channel_rejected() {
        let mut d = connected();
        assert_eq!(d.position(9), Err(HalError::InvalidChannel(9)));
        assert_eq!(d.set_velocity(0, 1.0), Err(HalError::InvalidChannel(0)));
    }

    #[test]
    fn velocity_moves_only_commanded_channel() {
        let mut d = connected();
        d.set_velocity(3, 5.0).unwrap();
        for _ in 0..50 {
            d.poll(Duration::from_millis(10)).unwrap();
        }
        assert!(d.position(3).unwrap() > 0.5);
        assert_eq!(d.position(1).unwrap(), 0.0);
        assert_eq!(d.position(2).unwrap(), 0.0);
    }

    #[test]
    fn gains_are_recorded() {
        let mut d = connected();
        d.set_velocity_gains(2, &VelocityGains::p(7.0)).unwrap();
        assert_eq!(d.motor(2).unwrap().gains().kp, 7.0);
    }

    #[test]
    fn shutdown_disconnects() {
        let mut d = connected();
        d.set_velocity(1, 3.0).unwrap();
        d.shutdown().unwrap();
        assert!(!d.is_connected());
        assert_eq!(d.motor(1).unwrap().command(), 0.0);
    }
}
