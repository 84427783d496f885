//! Addressable RGB indicator strip.

use crate::hal::driver::HalError;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `brightness`, rounding and clamping to 0..=255.
    ///
    /// Non-finite brightness yields [`Rgb::OFF`].
    pub fn scaled(self, brightness: f64) -> Self {
        if !brightness.is_finite() {
            return Self::OFF;
        }
        let scale = |c: u8| (f64::from(c) * brightness).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

/// A fixed-length strip of addressable RGB elements.
///
/// `set` and `fill` stage colors; nothing becomes visible until `commit`.
pub trait PixelStrip: Send {
    /// Number of elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage a color for one element (0-based).
    ///
    /// # Errors
    /// `HalError::ConfigError` if `index >= len()`.
    fn set(&mut self, index: usize, color: Rgb) -> Result<(), HalError>;

    /// Stage a color for every element.
    fn fill(&mut self, color: Rgb) -> Result<(), HalError>;

    /// Make the staged frame visible.
    fn commit(&mut self) -> Result<(), HalError>;
}
