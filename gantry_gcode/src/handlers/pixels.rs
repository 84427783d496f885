//! `M150`: set RGB pixel.
//!
//! | Key | Meaning | Default when malformed |
//! |-----|---------|------------------------|
//! | `P` | Element index, `0` = every element, `1..=len` = one element | `0` |
//! | `R`, `G`, `B` | Channel value `0..=255` | `0` |
//! | `I` | Brightness multiplier | `1.0` |
//!
//! Malformed values never fail the command: they are replaced by the default
//! and reported as warnings. An index outside `0..=len` leaves the strip
//! untouched.

use gantry_common::hal::pixels::{PixelStrip, Rgb};
use tracing::warn;

use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::params::{ParamWarning, ParameterSet};

/// Element(s) an `M150` addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSelection {
    /// Broadcast to every element.
    All,
    /// One element, 0-based.
    Element(usize),
    /// Index outside the strip; nothing written.
    Rejected(i64),
}

/// What one `M150` did.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelOutcome {
    /// Addressed element(s).
    pub selection: PixelSelection,
    /// Color after brightness scaling.
    pub color: Rgb,
    /// Malformed values that were replaced by defaults.
    pub warnings: Vec<ParamWarning>,
}

/// Map the 1-based `P` index onto the strip.
pub fn select(index: i64, len: usize) -> PixelSelection {
    match usize::try_from(index) {
        Ok(0) => PixelSelection::All,
        Ok(i) if i <= len => PixelSelection::Element(i - 1),
        _ => PixelSelection::Rejected(index),
    }
}

/// Parse an `M150` line and apply it to `strip`.
///
/// # Errors
/// Only strip failures (`InterpreterError::Hardware`).
pub fn apply_set_pixel(
    strip: &mut dyn PixelStrip,
    params: &ParameterSet,
) -> Result<PixelOutcome, InterpreterError> {
    let mut warnings = Vec::new();
    let index = params.lenient('P', 0i64).collect_into(&mut warnings);
    let r = params.lenient('R', 0u8).collect_into(&mut warnings);
    let g = params.lenient('G', 0u8).collect_into(&mut warnings);
    let b = params.lenient('B', 0u8).collect_into(&mut warnings);
    let brightness = params.lenient_finite('I', 1.0).collect_into(&mut warnings);

    let color = Rgb::new(r, g, b).scaled(brightness);
    let selection = select(index, strip.len());

    match selection {
        PixelSelection::All => strip.fill(color)?,
        PixelSelection::Element(i) => strip.set(i, color)?,
        PixelSelection::Rejected(_) => {}
    }
    if !matches!(selection, PixelSelection::Rejected(_)) {
        strip.commit()?;
    }

    Ok(PixelOutcome {
        selection,
        color,
        warnings,
    })
}

/// Bind `M150` to a pixel strip. The handler takes ownership of the strip.
pub fn register_pixel_handlers(
    interp: &mut Interpreter,
    mut strip: Box<dyn PixelStrip>,
) -> Result<(), InterpreterError> {
    interp.register_handler("M150", move |cmd, params| {
        let outcome = apply_set_pixel(strip.as_mut(), params)?;
        for w in &outcome.warnings {
            warn!(command = %cmd, "{}", w);
        }
        if let PixelSelection::Rejected(index) = outcome.selection {
            warn!(
                command = %cmd,
                "Pixel index {} out of range (0..={})",
                index,
                strip.len()
            );
        }
        Ok(())
    })
}
