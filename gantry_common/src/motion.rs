//! Motion model shared by input sources and the control loop.
//!
//! - [`axis`] - Logical axis groups
//! - [`units`] - Lead-screw millimeter/radian conversion
//! - [`target`] - The target state store
//! - [`config`] - Mechanics and control loop configuration

pub mod axis;
pub mod config;
pub mod target;
pub mod units;
