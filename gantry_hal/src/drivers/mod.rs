//! Driver implementations.
//!
//! - [`simulation`] - Software simulation of the motor board and pixel strip
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `MotorDriver` trait from `gantry_common::hal::driver`
//! 3. Register the driver in [`register_all_drivers`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_driver);
}
