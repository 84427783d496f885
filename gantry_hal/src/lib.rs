//! # Gantry HAL Library
//!
//! Motor and pixel driver backends with a pluggable driver registry.
//!
//! Drivers implement the `MotorDriver` trait defined in
//! `gantry_common::hal::driver`; indicator strips implement `PixelStrip`
//! from `gantry_common::hal::pixels`.
//!
//! # Module Structure
//!
//! - [`core`] - Driver bring-up sequence
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  gantry_hal (single crate)                 │
//! │  ┌──────────────────┐         ┌─────────────────────────┐  │
//! │  │ Driver Registry  │──────►  │  MotorDriver            │  │
//! │  │ name → factory   │ create  │  (trait object)         │  │
//! │  └──────────────────┘         └───────────┬─────────────┘  │
//! │                                           │ bring_up()     │
//! │                                           ▼                │
//! │                               configure → connect → gains  │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod core;
pub mod driver_registry;
pub mod drivers;

// Re-export key types for convenience
pub use crate::core::bring_up;
pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::register_all_drivers;
pub use crate::drivers::simulation::{SimulatedPixelStrip, SimulationDriver};
