//! Target state store.
//!
//! The single source of truth for the commanded position of each axis group.
//! Input sources write, the control loop reads once per tick. Both groups
//! live behind one mutex so a reader never sees a half-applied command.
//!
//! Values are converted and checked outside the lock; the critical section is
//! a plain copy of two `f64`.

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use thiserror::Error;

use crate::motion::axis::AxisGroup;
use crate::motion::units::LeadScrew;

/// Consistent pair of group targets [rad], relative to the zero reference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetSnapshot {
    /// Primary group target.
    pub x: f64,
    /// Secondary group target.
    pub y: f64,
}

impl TargetSnapshot {
    /// Target of one group.
    #[inline]
    pub const fn get(&self, group: AxisGroup) -> f64 {
        match group {
            AxisGroup::X => self.x,
            AxisGroup::Y => self.y,
        }
    }

    #[inline]
    fn set(&mut self, group: AxisGroup, value: f64) {
        match group {
            AxisGroup::X => self.x = value,
            AxisGroup::Y => self.y = value,
        }
    }
}

/// A target that cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TargetError {
    /// Not finite in millimeters, or not finite once converted to radians.
    #[error("target {value_mm} mm for group {group} is out of range")]
    OutOfRange {
        /// Group the value was meant for.
        group: AxisGroup,
        /// Rejected value [mm].
        value_mm: f64,
    },
}

/// Shared per-group position targets.
///
/// Targets are accepted in millimeters and stored in radians. Every stored
/// value is finite: a write whose conversion is not finite fails as a whole
/// and leaves both targets unchanged.
#[derive(Debug)]
pub struct TargetStore {
    lead: LeadScrew,
    targets: Mutex<TargetSnapshot>,
}

assert_impl_all!(TargetStore: Send, Sync);

impl TargetStore {
    /// Create a store with both targets at the zero reference.
    pub fn new(lead: LeadScrew) -> Self {
        Self {
            lead,
            targets: Mutex::new(TargetSnapshot::default()),
        }
    }

    /// Lead-screw ratio used for conversion. Immutable, read without locking.
    #[inline]
    pub fn lead_screw(&self) -> &LeadScrew {
        &self.lead
    }

    fn to_radians(&self, group: AxisGroup, value_mm: f64) -> Result<f64, TargetError> {
        self.lead
            .checked_mm_to_radians(value_mm)
            .ok_or(TargetError::OutOfRange { group, value_mm })
    }

    /// Set one group's target [mm].
    pub fn set_target(&self, group: AxisGroup, value_mm: f64) -> Result<(), TargetError> {
        let radians = self.to_radians(group, value_mm)?;
        self.targets.lock().set(group, radians);
        Ok(())
    }

    /// Set both groups' targets [mm] as one logical write.
    pub fn set_targets(&self, x_mm: f64, y_mm: f64) -> Result<(), TargetError> {
        let next = TargetSnapshot {
            x: self.to_radians(AxisGroup::X, x_mm)?,
            y: self.to_radians(AxisGroup::Y, y_mm)?,
        };
        *self.targets.lock() = next;
        Ok(())
    }

    /// Set whichever groups are present [mm] as one logical write.
    ///
    /// Absent groups keep their current target.
    pub fn set_partial(&self, x_mm: Option<f64>, y_mm: Option<f64>) -> Result<(), TargetError> {
        let x = x_mm.map(|mm| self.to_radians(AxisGroup::X, mm)).transpose()?;
        let y = y_mm.map(|mm| self.to_radians(AxisGroup::Y, mm)).transpose()?;
        if x.is_none() && y.is_none() {
            return Ok(());
        }
        let mut targets = self.targets.lock();
        if let Some(x) = x {
            targets.x = x;
        }
        if let Some(y) = y {
            targets.y = y;
        }
        Ok(())
    }

    /// Return both targets to the zero reference.
    pub fn reset(&self) {
        *self.targets.lock() = TargetSnapshot::default();
    }

    /// Consistent copy of both targets [rad].
    #[inline]
    pub fn snapshot(&self) -> TargetSnapshot {
        *self.targets.lock()
    }

    /// Consistent copy of both targets [mm].
    pub fn snapshot_mm(&self) -> (f64, f64) {
        let snap = self.snapshot();
        (
            self.lead.radians_to_mm(snap.x),
            self.lead.radians_to_mm(snap.y),
        )
    }
}
