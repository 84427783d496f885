//! Name → factory map for motor drivers.
//!
//! The registry is an ordinary value built at startup; the configured
//! `driver.name` is looked up once when the stage is brought up.

use gantry_common::hal::driver::{DriverFactory, HalError, MotorDriver};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Motor drivers known to this build.
#[derive(Default)]
pub struct DriverRegistry {
    factories: BTreeMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a driver under `name`.
    ///
    /// # Panics
    /// If `name` is taken. Registration happens once at startup from a fixed
    /// list, so a clash is a programming error.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        match self.factories.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(factory);
            }
            Entry::Occupied(_) => panic!("Driver '{name}' is already registered"),
        }
    }

    /// Factory registered under `name`.
    pub fn factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Instantiate the driver registered under `name`.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` for an unknown name.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn MotorDriver>, HalError> {
        match self.factory(name) {
            Some(factory) => Ok(factory()),
            None => Err(HalError::DriverNotFound(name.to_string())),
        }
    }

    /// Registered names in ascending order.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}
