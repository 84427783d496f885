//! # Gantry Control Library
//!
//! Fixed-period position hold for the gantry axes. Every tick reads the
//! measured shaft angles, compares them with the shared target store, applies
//! a per-group dead-band and proportional law, and commands velocities.
//!
//! ## Lifecycle
//!
//! `Uninitialized → Stabilizing → Holding`. Stabilizing zeroes every motor,
//! waits the settle interval and captures the zero reference; Holding runs
//! forever at the configured period.
//!
//! ## Allocation
//!
//! Axis bindings and per-tick outputs live in fixed-capacity `heapless`
//! vectors sized by `MAX_AXES`; the tick itself does not allocate.

pub mod control;
pub mod cycle;
pub mod error;
pub mod state;

pub use crate::control::law::{AxisLaw, apply_deadband};
pub use crate::cycle::{AxisOutput, ControlLoop, CycleStats, FaultCounters, TickReport, rt_setup};
pub use crate::error::CycleError;
pub use crate::state::LoopState;
