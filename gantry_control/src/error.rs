//! Control loop error types.

use gantry_common::config::ConfigError;
use gantry_common::hal::driver::HalError;
use thiserror::Error;

use crate::state::LoopState;

/// Errors during loop construction, startup or execution.
///
/// Driver faults while holding are counted and logged, never returned.
#[derive(Debug, Clone, Error)]
pub enum CycleError {
    /// RT system call failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),

    /// Driver failure while establishing the zero reference.
    #[error("stabilization failed ({stage}): {source}")]
    Stabilization {
        /// What was being done, e.g. "zero velocity X2".
        stage: String,
        /// Underlying driver error.
        #[source]
        source: HalError,
    },

    /// Operation not allowed in the current loop state.
    #[error("{operation} not allowed in state {state:?}")]
    InvalidState {
        /// Attempted operation.
        operation: &'static str,
        /// State at the time of the call.
        state: LoopState,
    },

    /// Loop configuration rejected.
    #[error("control configuration error: {0}")]
    Config(String),

    /// Control thread could not be started.
    #[error("failed to spawn control thread: {0}")]
    Spawn(String),
}

impl From<ConfigError> for CycleError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
