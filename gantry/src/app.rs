//! Startup sequence shared by the binaries.
//!
//! ```text
//! config ─► lead screw ─► TargetStore ─► driver (registry) ─► bring_up
//!        ─► ControlLoop::new ─► stabilize ─► spawn control thread
//! ```
//!
//! Stabilization runs on the calling thread, so no input source can write a
//! target before the zero reference exists.

use gantry_common::config::{ConfigError, GantryConfig, load_config};
use gantry_common::consts::DEFAULT_CONFIG_PATH;
use gantry_common::hal::driver::HalError;
use gantry_common::hal::pixels::PixelStrip;
use gantry_common::motion::target::TargetStore;
use gantry_control::{ControlLoop, CycleError};
use gantry_gcode::handlers::{register_motion_handlers, register_pixel_handlers};
use gantry_gcode::{Interpreter, InterpreterError};
use gantry_hal::{DriverRegistry, SimulatedPixelStrip, bring_up, register_all_drivers};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{info, warn};

/// Top-level error of the gantry binaries.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Driver: {0}")]
    Hal(#[from] HalError),

    #[error("Control loop: {0}")]
    Control(#[from] CycleError),

    #[error("Interpreter: {0}")]
    Interpreter(#[from] InterpreterError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Control thread panicked")]
    ControlPanicked,
}

/// Load the configuration.
///
/// With no explicit path, [`DEFAULT_CONFIG_PATH`] is tried and a missing file
/// means built-in defaults. An explicit path must exist.
pub fn load_config_or_default(path: Option<&Path>) -> Result<GantryConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => match load_config(Path::new(DEFAULT_CONFIG_PATH)) {
            Err(ConfigError::FileNotFound) => {
                let config = GantryConfig::default();
                config.validate()?;
                Ok(config)
            }
            other => other,
        },
    }
}

/// Interpreter with the motion and pixel handlers bound.
///
/// # Errors
/// `InvalidPolicy` if `policy_name` is neither `"strict"` nor `"permissive"`.
pub fn build_interpreter(
    policy_name: &str,
    targets: Arc<TargetStore>,
    strip: Box<dyn PixelStrip>,
) -> Result<Interpreter, InterpreterError> {
    let mut interp = Interpreter::from_policy_name(policy_name)?;
    register_motion_handlers(&mut interp, targets)?;
    register_pixel_handlers(&mut interp, strip)?;
    Ok(interp)
}

/// A running gantry: control thread started, targets writable.
pub struct Gantry {
    config: GantryConfig,
    targets: Arc<TargetStore>,
    pixels: SimulatedPixelStrip,
    control: JoinHandle<Result<(), CycleError>>,
}

impl Gantry {
    /// Bring the stage up with the built-in driver set.
    pub fn start(config: GantryConfig) -> Result<Self, AppError> {
        let mut registry = DriverRegistry::new();
        register_all_drivers(&mut registry);
        Self::start_with(config, &registry)
    }

    /// Bring the stage up, resolving the driver in `registry`.
    ///
    /// Blocks for the settle interval.
    pub fn start_with(config: GantryConfig, registry: &DriverRegistry) -> Result<Self, AppError> {
        let lead = config.mechanics.lead_screw()?;
        let targets = Arc::new(TargetStore::new(lead));

        let mut driver = registry.create_driver(&config.driver.name)?;
        bring_up(driver.as_mut(), &config.driver)?;

        let mut control =
            ControlLoop::new(driver, &config.driver, &config.control, Arc::clone(&targets))?;
        control.stabilize()?;
        let control = control.spawn()?;

        let pixels = SimulatedPixelStrip::new(config.pixels.count);
        info!(
            service = %config.shared.service_name,
            driver = %config.driver.name,
            "Gantry ready"
        );

        Ok(Self {
            config,
            targets,
            pixels,
            control,
        })
    }

    pub fn config(&self) -> &GantryConfig {
        &self.config
    }

    /// Target store written by input sources.
    pub fn targets(&self) -> &Arc<TargetStore> {
        &self.targets
    }

    /// Handle on the indicator strip.
    pub fn pixels(&self) -> &SimulatedPixelStrip {
        &self.pixels
    }

    /// New interpreter writing to this gantry's targets and strip.
    pub fn interpreter(&self, policy_name: &str) -> Result<Interpreter, AppError> {
        Ok(build_interpreter(
            policy_name,
            Arc::clone(&self.targets),
            Box::new(self.pixels.clone()),
        )?)
    }

    /// Whether the control thread is still running.
    pub fn is_running(&self) -> bool {
        !self.control.is_finished()
    }

    /// Keep holding the last targets until the control thread ends.
    ///
    /// The loop only returns on error, so this normally blocks until the
    /// process is terminated.
    pub fn hold(self) -> Result<(), AppError> {
        info!("Input finished, holding position");
        match self.control.join() {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!("Control thread panicked");
                Err(AppError::ControlPanicked)
            }
        }
    }
}
