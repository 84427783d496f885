//! Built-in command handlers.
//!
//! - [`motion`] - `G0`, `G1` (linear move) and `G28` (return to reference)
//! - [`pixels`] - `M150` (set RGB pixel)

pub mod motion;
pub mod pixels;

pub use motion::register_motion_handlers;
pub use pixels::register_pixel_handlers;
