//! Loop lifecycle state machine.

/// Control loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created, motors not yet zeroed.
    #[default]
    Uninitialized,
    /// Motors held at zero velocity while the carriage settles.
    Stabilizing,
    /// Reference captured; closed-loop hold active.
    Holding,
}

/// Lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Start zeroing the motors.
    BeginStabilize,
    /// Zero reference captured.
    ReferenceCaptured,
}

impl LoopState {
    /// Apply an event. Returns `None` if the transition is not allowed.
    pub fn handle_event(self, event: LoopEvent) -> Option<LoopState> {
        match (self, event) {
            (Self::Uninitialized, LoopEvent::BeginStabilize) => Some(Self::Stabilizing),
            (Self::Stabilizing, LoopEvent::ReferenceCaptured) => Some(Self::Holding),
            _ => None,
        }
    }

    /// Whether the loop is commanding velocities from targets.
    pub const fn is_holding(self) -> bool {
        matches!(self, Self::Holding)
    }
}
