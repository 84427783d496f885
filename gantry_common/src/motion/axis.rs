//! Logical axis groups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical linear axis commanded from a single target.
///
/// `X` is the primary group and is driven by two motors in unison on the
/// reference machine; `Y` is the secondary group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisGroup {
    /// Primary linear group.
    X,
    /// Secondary linear group.
    Y,
}

impl AxisGroup {
    /// Both groups, in a stable order.
    pub const ALL: [AxisGroup; 2] = [AxisGroup::X, AxisGroup::Y];

    /// Parameter key used for this group on a G-code line.
    pub const fn key(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
        }
    }
}

impl fmt::Display for AxisGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}
