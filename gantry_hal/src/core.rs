//! Driver bring-up.
//!
//! Takes a freshly created driver from "unconfigured" to "connected with
//! velocity loops programmed". Every step is fatal on failure.

use gantry_common::hal::config::DriverConfig;
use gantry_common::hal::driver::{HalError, MotorDriver};
use tracing::info;

/// Configure, connect and program per-channel velocity gains.
///
/// # Errors
/// The first `HalError` returned by the driver.
pub fn bring_up(driver: &mut dyn MotorDriver, config: &DriverConfig) -> Result<(), HalError> {
    info!(
        "Bringing up driver '{}' v{} ({} axes)",
        driver.name(),
        driver.version(),
        config.axes.len()
    );

    driver.configure(config)?;
    driver.connect()?;

    for axis in &config.axes {
        driver.set_velocity_gains(axis.channel, &axis.velocity_gains)?;
        info!(
            "  Axis {} on channel {} → group {} (limit {:.1} V)",
            axis.name, axis.channel, axis.group, axis.voltage_limit
        );
    }

    Ok(())
}
