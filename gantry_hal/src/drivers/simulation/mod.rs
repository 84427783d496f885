//! Simulation driver module.
//!
//! Software stand-ins for the motor controller board and the RGB strip, for
//! development and testing without physical hardware.

mod driver;
mod motor;
mod pixels;

pub use driver::SimulationDriver;
pub use motor::SimulatedMotor;
pub use pixels::SimulatedPixelStrip;

use gantry_common::hal::driver::MotorDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn MotorDriver> {
    Box::new(SimulationDriver::new())
}
