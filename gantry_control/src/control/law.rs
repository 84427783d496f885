//! Dead-band + proportional position law.
//!
//! ```text
//! e' = 0      if |e| < threshold
//! e' = e      otherwise
//! v  = Kp · e'
//! ```
//!
//! The comparison is strict: an error exactly at the threshold is outside
//! the band and produces a non-zero command.

use gantry_common::motion::config::GroupGains;

/// Zero `error` when its magnitude is strictly below `threshold`.
#[inline]
pub fn apply_deadband(error: f64, threshold: f64) -> f64 {
    if error.abs() < threshold { 0.0 } else { error }
}

/// Per-group position law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLaw {
    /// Proportional gain [(rad/s) / rad].
    pub kp: f64,
    /// Dead-band threshold [rad].
    pub deadband: f64,
}

impl AxisLaw {
    /// Create a law from gain and threshold.
    pub const fn new(kp: f64, deadband: f64) -> Self {
        Self { kp, deadband }
    }

    /// Velocity command [rad/s] for a position error [rad].
    #[inline]
    pub fn velocity(&self, error: f64) -> f64 {
        self.kp * apply_deadband(error, self.deadband)
    }
}

impl From<GroupGains> for AxisLaw {
    fn from(g: GroupGains) -> Self {
        Self::new(g.kp, g.deadband)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_band_is_zero() {
        let law = AxisLaw::new(5.0, 0.5);
        assert_eq!(law.velocity(0.3), 0.0);
        assert_eq!(law.velocity(-0.3), 0.0);
        assert_eq!(law.velocity(0.0), 0.0);
    }

    #[test]
    fn outside_band_is_proportional() {
        let law = AxisLaw::new(5.0, 0.5);
        assert_eq!(law.velocity(1.0), 5.0);
        assert_eq!(law.velocity(-2.0), -10.0);
    }

    #[test]
    fn boundary_is_outside_band() {
        assert_eq!(apply_deadband(0.5, 0.5), 0.5);
        assert_eq!(apply_deadband(-0.5, 0.5), -0.5);
        assert_eq!(AxisLaw::new(5.0, 0.5).velocity(0.5), 2.5);

        let just_above = 0.5 + 1e-9;
        assert_eq!(AxisLaw::new(5.0, 0.5).velocity(just_above), 5.0 * just_above);
    }

    #[test]
    fn zero_threshold_passes_everything() {
        assert_eq!(apply_deadband(1e-12, 0.0), 1e-12);
    }

    #[test]
    fn from_group_gains() {
        let law = AxisLaw::from(GroupGains {
            kp: 10.0,
            deadband: 0.3,
        });
        assert_eq!(law, AxisLaw::new(10.0, 0.3));
    }
}
