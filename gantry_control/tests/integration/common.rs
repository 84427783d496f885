//! Shared fixtures.

use gantry_common::hal::config::{DriverConfig, VelocityGains};
use gantry_common::hal::driver::{HalError, MotorDriver};
use gantry_common::motion::config::ControlConfig;
use gantry_common::motion::target::TargetStore;
use gantry_common::motion::units::LeadScrew;
use gantry_control::ControlLoop;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// State shared between a `RecordingDriver` and the test body.
#[derive(Default)]
pub struct Bench {
    pub positions: BTreeMap<u8, f64>,
    pub commands: Vec<(u8, f64)>,
    pub fail_read: Option<u8>,
    pub fail_write: Option<u8>,
}

/// Driver whose positions are set by the test and whose commands are logged.
pub struct RecordingDriver {
    bench: Arc<Mutex<Bench>>,
}

impl MotorDriver for RecordingDriver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn version(&self) -> &'static str {
        "0.0.0"
    }

    fn configure(&mut self, config: &DriverConfig) -> Result<(), HalError> {
        let mut bench = self.bench.lock();
        for axis in &config.axes {
            bench.positions.entry(axis.channel).or_insert(0.0);
        }
        Ok(())
    }

    fn connect(&mut self) -> Result<(), HalError> {
        Ok(())
    }

    fn set_velocity_gains(&mut self, _channel: u8, _gains: &VelocityGains) -> Result<(), HalError> {
        Ok(())
    }

    fn position(&self, channel: u8) -> Result<f64, HalError> {
        let bench = self.bench.lock();
        if bench.fail_read == Some(channel) {
            return Err(HalError::CommunicationError("read timeout".to_string()));
        }
        bench
            .positions
            .get(&channel)
            .copied()
            .ok_or(HalError::InvalidChannel(channel))
    }

    fn set_velocity(&mut self, channel: u8, velocity: f64) -> Result<(), HalError> {
        let mut bench = self.bench.lock();
        if bench.fail_write == Some(channel) {
            return Err(HalError::CommunicationError("write timeout".to_string()));
        }
        bench.commands.push((channel, velocity));
        Ok(())
    }
}

/// Control config with no settle delay.
pub fn fast_control() -> ControlConfig {
    ControlConfig {
        settle_time_ms: 0,
        ..Default::default()
    }
}

pub fn store() -> Arc<TargetStore> {
    Arc::new(TargetStore::new(LeadScrew::new(8.0).unwrap()))
}

/// Loop over the default X1/X2/Y channel map, already configured.
pub fn recording_loop(
    control: &ControlConfig,
) -> (ControlLoop, Arc<Mutex<Bench>>, Arc<TargetStore>) {
    let bench = Arc::new(Mutex::new(Bench::default()));
    let config = DriverConfig::default();
    let mut driver = RecordingDriver {
        bench: Arc::clone(&bench),
    };
    driver.configure(&config).unwrap();

    let targets = store();
    let cl = ControlLoop::new(Box::new(driver), &config, control, Arc::clone(&targets)).unwrap();
    (cl, bench, targets)
}
