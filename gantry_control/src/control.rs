//! Control law.
//!
//! - [`law`] - Dead-band and proportional velocity law

pub mod law;
