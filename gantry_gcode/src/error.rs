//! Interpreter error types.

use gantry_common::hal::driver::HalError;
use thiserror::Error;

/// Errors raised while configuring or running an interpreter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    /// Policy name other than `strict` / `permissive`.
    #[error("invalid failure policy '{0}' (expected \"strict\" or \"permissive\")")]
    InvalidPolicy(String),

    /// Handler registration for a command outside the G/M families.
    #[error("invalid command family '{0}': commands must start with G or M")]
    InvalidCommandFamily(String),

    /// No handler for the command under the strict policy.
    #[error("no handler registered for command '{0}'")]
    UnregisteredCommand(String),

    /// Parameter value a handler cannot use.
    #[error("{command}: malformed parameter {key}='{value}'")]
    MalformedParameter {
        /// Normalized command.
        command: String,
        /// Parameter key.
        key: char,
        /// Raw value.
        value: String,
    },

    /// Peripheral or motor driver failure inside a handler.
    #[error("hardware error: {0}")]
    Hardware(#[from] HalError),
}
