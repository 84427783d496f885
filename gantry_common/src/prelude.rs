//! Prelude module for common re-exports.
//!
//! ```rust
//! use gantry_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, GantryConfig, SharedConfig, load_config};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{CYCLE_TIME_MS, MAX_AXES};

// ─── Motion ─────────────────────────────────────────────────────────
pub use crate::motion::axis::AxisGroup;
pub use crate::motion::target::{TargetError, TargetSnapshot, TargetStore};
pub use crate::motion::units::LeadScrew;

// ─── Drivers ────────────────────────────────────────────────────────
pub use crate::hal::driver::{HalError, MotorDriver};
pub use crate::hal::pixels::{PixelStrip, Rgb};

/// Default control loop period as Duration.
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_millis(CYCLE_TIME_MS);
