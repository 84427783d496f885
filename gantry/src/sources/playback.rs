//! G-code file playback.

use gantry_common::config::PlaybackConfig;
use gantry_gcode::Interpreter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::app::AppError;

/// Feeds lines to an interpreter at a fixed pace.
///
/// The pace is independent of the control period: targets change at most
/// once per line delay, the loop keeps converging in between.
#[derive(Debug, Clone, Copy)]
pub struct Playback {
    line_delay: Duration,
}

impl Playback {
    pub fn new(line_delay: Duration) -> Self {
        Self { line_delay }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.line_delay())
    }

    pub fn line_delay(&self) -> Duration {
        self.line_delay
    }

    /// Process lines in order, sleeping after each one.
    ///
    /// Lines are trimmed; blank lines go through the interpreter like any other
    /// (a permissive interpreter ignores them). The first interpreter error
    /// aborts playback and is returned; earlier effects stay.
    ///
    /// Returns the number of lines processed.
    pub fn run<I, S>(&self, interp: &mut Interpreter, lines: I) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut processed = 0;
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            debug!(line = index + 1, "{}", line);
            if let Err(e) = interp.process_line(line) {
                error!(line = index + 1, "Playback aborted: {}", e);
                return Err(e.into());
            }
            processed += 1;
            if !self.line_delay.is_zero() {
                thread::sleep(self.line_delay);
            }
        }
        Ok(processed)
    }

    /// Stream a file through [`Playback::run`].
    pub fn run_file(&self, interp: &mut Interpreter, path: &Path) -> Result<usize, AppError> {
        let io_err = |source| AppError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        info!(path = %path.display(), policy = %interp.policy(), "Playback started");

        let mut read_error = None;
        let lines = BufReader::new(file).lines().map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                read_error = Some(e);
                None
            }
        });
        let processed = self.run(interp, lines)?;

        if let Some(e) = read_error {
            return Err(io_err(e));
        }
        info!(lines = processed, "Playback finished");
        Ok(processed)
    }
}
