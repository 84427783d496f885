//! Gantry Common Library
//!
//! This crate provides the types shared by every gantry workspace crate:
//! configuration loading, the lead-screw unit model, the target state store,
//! and the driver traits the control loop and command handlers call into.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and the top-level `GantryConfig`
//! - [`consts`] - System-wide limits and defaults
//! - [`motion`] - Axis groups, lead-screw conversion and the target store
//! - [`hal`] - Motor and pixel driver traits, driver configuration
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use gantry_common::prelude::*;
//!
//! let lead = LeadScrew::new(8.0).unwrap();
//! let store = TargetStore::new(lead);
//! store.set_targets(50.0, 25.0).unwrap();
//! let snap = store.snapshot();
//! assert!(snap.x > snap.y);
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod motion;
pub mod prelude;
