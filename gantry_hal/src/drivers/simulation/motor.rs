//! Motor physics simulator.
//!
//! A velocity-mode motor with a first-order velocity response and a speed
//! ceiling set by the voltage limit. Position is integrated from velocity.

use gantry_common::hal::config::{AxisChannelConfig, SimulationConfig, VelocityGains};
use std::time::Duration;
use tracing::trace;

/// One simulated motor shaft.
#[derive(Debug, Clone)]
pub struct SimulatedMotor {
    /// Display name from configuration
    name: String,
    /// Shaft angle [rad]
    position: f64,
    /// Shaft speed [rad/s]
    velocity: f64,
    /// Last commanded speed [rad/s], before saturation
    command: f64,
    /// Speed ceiling derived from the voltage limit [rad/s]
    max_velocity: f64,
    /// Velocity response time constant [s]
    time_constant_s: f64,
    /// Inner loop gains as programmed by the caller
    gains: VelocityGains,
}

impl SimulatedMotor {
    /// Create a motor at rest at angle zero.
    pub fn new(axis: &AxisChannelConfig, sim: &SimulationConfig) -> Self {
        Self {
            name: axis.name.clone(),
            position: 0.0,
            velocity: 0.0,
            command: 0.0,
            max_velocity: axis.voltage_limit * sim.velocity_per_volt,
            time_constant_s: sim.velocity_time_constant_s,
            gains: axis.velocity_gains,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shaft angle [rad].
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Shaft speed [rad/s].
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Last commanded speed [rad/s].
    pub fn command(&self) -> f64 {
        self.command
    }

    /// Speed ceiling [rad/s].
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Programmed inner loop gains.
    pub fn gains(&self) -> VelocityGains {
        self.gains
    }

    /// Force the shaft angle, e.g. to model a carriage that did not start at zero.
    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    pub(super) fn set_gains(&mut self, gains: VelocityGains) {
        self.gains = gains;
    }

    pub(super) fn set_command(&mut self, velocity: f64) {
        self.command = velocity;
    }

    /// Advance the motor by `dt`.
    pub fn update(&mut self, dt: Duration) {
        let dt_s = dt.as_secs_f64();
        if dt_s <= 0.0 {
            return;
        }

        let target = self.command.clamp(-self.max_velocity, self.max_velocity);
        let alpha = 1.0 - (-dt_s / self.time_constant_s).exp();
        self.velocity += (target - self.velocity) * alpha;
        self.position += self.velocity * dt_s;

        trace!(
            motor = %self.name,
            position = self.position,
            velocity = self.velocity,
            "Motor update"
        );
    }
}
