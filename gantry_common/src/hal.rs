//! Hardware abstraction layer contract.
//!
//! This module contains the driver-facing types shared by the control loop,
//! the command handlers and the driver implementations:
//! - [`config`] - Driver selection and per-axis electrical configuration
//! - [`driver`] - `MotorDriver` trait and `HalError`
//! - [`pixels`] - Addressable RGB indicator strip

pub mod config;
pub mod driver;
pub mod pixels;
