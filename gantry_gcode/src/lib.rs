//! # Gantry G-code Library
//!
//! Line-oriented command interpreter for the gantry stage.
//!
//! A line is split on whitespace: the first token is the command
//! (`G1`, `M150`, ...), every further token is a `<Key><Value>` parameter.
//! Commands are normalized (trimmed, upper-cased, `G01` → `G1`) and
//! dispatched to handlers registered up front. What happens to a command
//! nobody registered is decided by the interpreter's [`FailurePolicy`].
//!
//! ```rust
//! use gantry_gcode::{FailurePolicy, Interpreter};
//!
//! let mut interp = Interpreter::new(FailurePolicy::Strict);
//! interp.register_handler("G01", |_cmd, params| {
//!     assert_eq!(params.get('X'), Some("10"));
//!     Ok(())
//! }).unwrap();
//! interp.process_line("g1 x10").unwrap();
//! assert!(interp.process_line("G2 X1").is_err());
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - Command identifiers and normalization
//! - [`params`] - Parameter sets and value parsing
//! - [`interpreter`] - Handler registry, failure policy, dispatch
//! - [`handlers`] - Motion (`G0`/`G1`/`G28`) and pixel (`M150`) handlers
//! - [`error`] - `InterpreterError`

pub mod command;
pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod params;

pub use crate::command::{Command, normalize};
pub use crate::error::InterpreterError;
pub use crate::interpreter::{FailurePolicy, Handler, Interpreter};
pub use crate::params::{ParamWarning, ParameterSet, Parsed};
