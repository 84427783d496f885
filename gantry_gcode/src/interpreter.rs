//! Handler registry and dispatch.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::command::Command;
use crate::error::InterpreterError;
use crate::params::ParameterSet;

/// What to do with a command that has no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail with `UnregisteredCommand`.
    Strict,
    /// Ignore silently.
    Permissive,
}

impl FromStr for FailurePolicy {
    type Err = InterpreterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(InterpreterError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

/// Callback bound to one command.
pub type Handler = Box<dyn FnMut(&Command, &ParameterSet) -> Result<(), InterpreterError> + Send>;

/// Command interpreter.
///
/// Handlers are registered before lines are processed. One interpreter is
/// driven from one thread at a time; it is `Send` so it can be moved to the
/// thread that owns an input source.
pub struct Interpreter {
    policy: FailurePolicy,
    handlers: HashMap<Command, Handler>,
}

impl Interpreter {
    /// Create an interpreter with no handlers.
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            handlers: HashMap::new(),
        }
    }

    /// Create an interpreter from a policy name (`"strict"` / `"permissive"`).
    ///
    /// # Errors
    /// `InvalidPolicy` for any other name.
    pub fn from_policy_name(name: &str) -> Result<Self, InterpreterError> {
        Ok(Self::new(name.parse()?))
    }

    /// Policy fixed at construction.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Bind a handler to a command. Replaces any previous binding.
    ///
    /// # Errors
    /// `InvalidCommandFamily` unless the normalized command starts with `G` or `M`.
    pub fn register_handler<F>(&mut self, command: &str, handler: F) -> Result<(), InterpreterError>
    where
        F: FnMut(&Command, &ParameterSet) -> Result<(), InterpreterError> + Send + 'static,
    {
        let command = Command::parse(command);
        if !command.is_dispatchable() {
            return Err(InterpreterError::InvalidCommandFamily(command.to_string()));
        }
        if self.handlers.insert(command.clone(), Box::new(handler)).is_some() {
            debug!("Handler for {} replaced", command);
        } else {
            debug!("Handler for {} registered", command);
        }
        Ok(())
    }

    /// Whether a handler is bound to the (raw) command.
    pub fn is_registered(&self, command: &str) -> bool {
        self.handlers.contains_key(&Command::parse(command))
    }

    /// Registered commands, sorted.
    pub fn registered_commands(&self) -> Vec<&Command> {
        let mut commands: Vec<_> = self.handlers.keys().collect();
        commands.sort_unstable();
        commands
    }

    /// Split a line into its command and parameters.
    ///
    /// An empty or blank line yields the empty command.
    pub fn parse(line: &str) -> (Command, ParameterSet) {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().map(Command::parse).unwrap_or_default();
        let params: ParameterSet = tokens.collect();
        trace!(command = %command, params = params.len(), "Parsed line");
        (command, params)
    }

    /// Run the handler bound to `command`, or apply the failure policy.
    pub fn dispatch(&mut self, command: &Command, params: &ParameterSet) -> Result<(), InterpreterError> {
        match self.handlers.get_mut(command) {
            Some(handler) => {
                debug!(command = %command, "Dispatching");
                handler(command, params)
            }
            None => match self.policy {
                FailurePolicy::Strict => {
                    Err(InterpreterError::UnregisteredCommand(command.to_string()))
                }
                FailurePolicy::Permissive => {
                    trace!(command = %command, "No handler, ignored");
                    Ok(())
                }
            },
        }
    }

    /// Parse and dispatch one line.
    pub fn process_line(&mut self, line: &str) -> Result<(), InterpreterError> {
        let (command, params) = Self::parse(line);
        self.dispatch(&command, &params)
    }

    /// Process lines in order. The first error aborts the rest and is returned.
    pub fn process_lines<I, S>(&mut self, lines: I) -> Result<(), InterpreterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("policy", &self.policy)
            .field("handlers", &self.registered_commands())
            .finish()
    }
}
