//! Interactive console.
//!
//! | Input | Effect |
//! |-------|--------|
//! | empty line | keep current targets |
//! | `x` or `x y` [mm] | set X, or both targets |
//! | line starting with a letter | G-code through the interpreter |
//!
//! A malformed line is reported and leaves the targets unchanged; the
//! console keeps reading until end of input.

use gantry_common::motion::target::{TargetError, TargetStore};
use gantry_gcode::{Interpreter, InterpreterError};
use std::io::BufRead;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A rejected console line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    #[error("invalid target value '{0}'")]
    InvalidTarget(String),

    #[error("expected at most 2 values, got {0}")]
    TooManyValues(usize),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}

/// A classified console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput<'a> {
    Empty,
    Targets { x: f64, y: Option<f64> },
    GCode(&'a str),
}

impl<'a> ConsoleInput<'a> {
    /// Classify one line. Both numbers are validated before anything is
    /// returned, so a bad `y` also discards `x`.
    pub fn parse(line: &'a str) -> Result<Self, ConsoleError> {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            return Ok(Self::Empty);
        };
        if first.is_ascii_alphabetic() {
            return Ok(Self::GCode(line));
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() > 2 {
            return Err(ConsoleError::TooManyValues(tokens.len()));
        }
        let value = |token: &str| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ConsoleError::InvalidTarget(token.to_string())),
        };
        let x = value(tokens[0])?;
        let y = tokens.get(1).copied().map(value).transpose()?;
        Ok(Self::Targets { x, y })
    }
}

/// Console input source.
pub struct Console {
    targets: Arc<TargetStore>,
    interp: Interpreter,
}

impl Console {
    pub fn new(targets: Arc<TargetStore>, interp: Interpreter) -> Self {
        Self { targets, interp }
    }

    /// Apply one line.
    pub fn handle_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        match ConsoleInput::parse(line)? {
            ConsoleInput::Empty => {
                debug!("Empty input, targets kept");
            }
            ConsoleInput::Targets { x, y } => {
                self.targets.set_partial(Some(x), y)?;
                let (tx, ty) = self.targets.snapshot_mm();
                info!("Target: X={:.3} mm, Y={:.3} mm", tx, ty);
            }
            ConsoleInput::GCode(line) => {
                self.interp.process_line(line)?;
            }
        }
        Ok(())
    }

    /// Read lines until end of input. Rejected lines are logged and skipped.
    ///
    /// Returns the number of lines read.
    pub fn run<R: BufRead>(&mut self, input: R) -> std::io::Result<usize> {
        let mut count = 0;
        for line in input.lines() {
            let line = line?;
            count += 1;
            if let Err(e) = self.handle_line(&line) {
                warn!(line = count, "Input rejected: {}", e);
            }
        }
        info!(lines = count, "Console input closed");
        Ok(count)
    }
}
