//! Lead-screw unit conversion.
//!
//! One full screw rotation (2π rad) moves the carriage by `lead_mm`.

use std::f64::consts::TAU;

use crate::config::ConfigError;

/// Immutable millimeter/radian ratio of a lead screw.
///
/// Invariant: `lead_mm` is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadScrew {
    lead_mm: f64,
}

impl LeadScrew {
    /// Create a lead screw with the given lead [mm/rev].
    ///
    /// # Errors
    /// `ConfigError::ValidationError` if the lead is not finite and positive.
    pub fn new(lead_mm: f64) -> Result<Self, ConfigError> {
        if !lead_mm.is_finite() || lead_mm <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "lead_mm must be finite and > 0 (got {lead_mm})"
            )));
        }
        Ok(Self { lead_mm })
    }

    /// Lead [mm/rev].
    #[inline]
    pub const fn lead_mm(&self) -> f64 {
        self.lead_mm
    }

    /// Linear travel [mm] → screw angle [rad].
    #[inline]
    pub fn mm_to_radians(&self, mm: f64) -> f64 {
        mm * TAU / self.lead_mm
    }

    /// Like [`LeadScrew::mm_to_radians`], but `None` unless the angle is
    /// finite. Catches finite inputs that overflow in the conversion.
    #[inline]
    pub fn checked_mm_to_radians(&self, mm: f64) -> Option<f64> {
        let radians = self.mm_to_radians(mm);
        radians.is_finite().then_some(radians)
    }

    /// Screw angle [rad] → linear travel [mm].
    #[inline]
    pub fn radians_to_mm(&self, radians: f64) -> f64 {
        radians * self.lead_mm / TAU
    }
}
