//! Input sources. Each one writes targets and never talks to the driver.
//!
//! - [`playback`] - G-code file, one line at a time with a fixed delay
//! - [`console`] - Typed `X Y` pairs or G-code lines
//! - [`pointer`] - Clicks on a plotted work area

pub mod console;
pub mod playback;
pub mod pointer;

pub use console::{Console, ConsoleError, ConsoleInput};
pub use playback::Playback;
pub use pointer::PointerSource;
