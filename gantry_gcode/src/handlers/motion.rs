//! Motion commands.
//!
//! | Command | Parameters | Effect |
//! |---------|------------|--------|
//! | `G0`, `G1` | `X`, `Y` [mm], others ignored | Move targets; a missing axis keeps its target |
//! | `G28` | none | Both targets back to the zero reference |
//!
//! Both coordinates are parsed and converted before anything is written. A
//! malformed coordinate, or one too large to convert to a screw angle,
//! rejects the whole command. The write itself is one critical section on
//! the target store.

use gantry_common::motion::axis::AxisGroup;
use gantry_common::motion::target::{TargetError, TargetStore};
use std::sync::Arc;
use tracing::{debug, info};

use crate::command::Command;
use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::params::ParameterSet;

/// Parse `X`/`Y` of a move and write the targets.
pub fn apply_linear_move(
    targets: &TargetStore,
    command: &Command,
    params: &ParameterSet,
) -> Result<(), InterpreterError> {
    let x = params.number(command, AxisGroup::X.key())?;
    let y = params.number(command, AxisGroup::Y.key())?;

    for key in params.keys() {
        if key != AxisGroup::X.key() && key != AxisGroup::Y.key() {
            debug!(command = %command, key = %key, "Ignoring parameter");
        }
    }

    targets
        .set_partial(x, y)
        .map_err(|TargetError::OutOfRange { group, .. }| {
            InterpreterError::MalformedParameter {
                command: command.to_string(),
                key: group.key(),
                value: params.get(group.key()).unwrap_or_default().to_string(),
            }
        })?;
    debug!(command = %command, x_mm = ?x, y_mm = ?y, "Targets updated");
    Ok(())
}

/// Bind `G0`, `G1` and `G28` to the target store.
pub fn register_motion_handlers(
    interp: &mut Interpreter,
    targets: Arc<TargetStore>,
) -> Result<(), InterpreterError> {
    for command in ["G0", "G1"] {
        let targets = Arc::clone(&targets);
        interp.register_handler(command, move |cmd, params| {
            apply_linear_move(&targets, cmd, params)
        })?;
    }

    interp.register_handler("G28", move |_cmd, _params| {
        targets.reset();
        info!("Targets returned to reference");
        Ok(())
    })?;

    Ok(())
}
