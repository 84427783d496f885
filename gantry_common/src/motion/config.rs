//! Mechanics and control loop configuration.
//!
//! Dead-band thresholds and proportional gains are deployment settings; the
//! reference machine has been run with thresholds of 0.2, 0.3 and 0.5 rad and
//! gains of 5, 10 and 20.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigError;
use crate::consts::{CYCLE_TIME_MS, LEAD_MM, SETTLE_TIME_MS, STATUS_INTERVAL};
use crate::motion::axis::AxisGroup;
use crate::motion::units::LeadScrew;

/// Lead-screw mechanics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MechanicsConfig {
    /// Screw lead [mm/rev].
    pub lead_mm: f64,
}

impl Default for MechanicsConfig {
    fn default() -> Self {
        Self { lead_mm: LEAD_MM }
    }
}

impl MechanicsConfig {
    /// Validate the lead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lead_screw().map(|_| ())
    }

    /// Build the immutable lead-screw ratio.
    pub fn lead_screw(&self) -> Result<LeadScrew, ConfigError> {
        LeadScrew::new(self.lead_mm)
    }
}

/// Proportional law parameters for one axis group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupGains {
    /// Proportional gain [(rad/s) / rad].
    pub kp: f64,
    /// Dead-band threshold [rad]. Errors with magnitude strictly below are zeroed.
    pub deadband: f64,
}

impl Default for GroupGains {
    fn default() -> Self {
        Self {
            kp: 5.0,
            deadband: 0.5,
        }
    }
}

impl GroupGains {
    fn validate(&self, group: AxisGroup) -> Result<(), ConfigError> {
        if !self.kp.is_finite() || self.kp < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "control.{group}.kp must be finite and >= 0 (got {})",
                self.kp
            )));
        }
        if !self.deadband.is_finite() || self.deadband < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "control.{group}.deadband must be finite and >= 0 (got {})",
                self.deadband
            )));
        }
        Ok(())
    }
}

/// Control loop timing and per-group law.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConfig {
    /// Loop period [ms].
    pub cycle_time_ms: u64,
    /// Zero-velocity settle interval before capturing the reference [ms].
    pub settle_time_ms: u64,
    /// Ticks between debug status lines.
    pub status_interval: u64,
    /// Primary group law.
    pub x: GroupGains,
    /// Secondary group law.
    pub y: GroupGains,
    /// CPU core the loop thread is pinned to (`rt` builds only).
    pub cpu_core: usize,
    /// SCHED_FIFO priority of the loop thread (`rt` builds only).
    pub rt_priority: i32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            cycle_time_ms: CYCLE_TIME_MS,
            settle_time_ms: SETTLE_TIME_MS,
            status_interval: STATUS_INTERVAL,
            x: GroupGains::default(),
            y: GroupGains::default(),
            cpu_core: 1,
            rt_priority: 80,
        }
    }
}

impl ControlConfig {
    /// Law parameters for a group.
    pub fn gains(&self, group: AxisGroup) -> GroupGains {
        match group {
            AxisGroup::X => self.x,
            AxisGroup::Y => self.y,
        }
    }

    /// Loop period as Duration.
    pub fn cycle_time(&self) -> Duration {
        Duration::from_millis(self.cycle_time_ms)
    }

    /// Settle interval as Duration.
    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }

    /// Validate timing and gains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_time_ms == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_ms must be greater than 0".to_string(),
            ));
        }
        if self.status_interval == 0 {
            return Err(ConfigError::ValidationError(
                "status_interval must be greater than 0".to_string(),
            ));
        }
        if !(1..=99).contains(&self.rt_priority) {
            return Err(ConfigError::ValidationError(format!(
                "rt_priority must be in 1..=99 (got {})",
                self.rt_priority
            )));
        }
        for group in AxisGroup::ALL {
            self.gains(group).validate(group)?;
        }
        Ok(())
    }
}
