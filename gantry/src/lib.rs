//! # Gantry
//!
//! Wiring for the gantry stage controller: configuration → driver bring-up
//! → control loop on its own thread → an input source on the calling thread.
//!
//! # Module Structure
//!
//! - [`app`] - Startup sequence and `AppError`
//! - [`logging`] - `tracing-subscriber` setup shared by the binaries
//! - [`sources`] - Input sources: file playback, console, pointer clicks
//!
//! # Threads
//!
//! ```text
//!  input source thread                      control thread (gantry-control)
//!  ───────────────────                      ───────────────────────────────
//!  Playback / Console / Pointer             every 10 ms:
//!        │                                    poll driver
//!        │ Interpreter → handlers             read positions
//!        ▼                                    snapshot targets ◄──┐
//!  TargetStore::set_* ───────────────────────────────────────────┘
//!                                             command velocities
//! ```

pub mod app;
pub mod logging;
pub mod sources;

pub use crate::app::{AppError, Gantry, build_interpreter, load_config_or_default};
