//! In-memory RGB strip.

use gantry_common::hal::driver::HalError;
use gantry_common::hal::pixels::{PixelStrip, Rgb};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct StripState {
    staged: Vec<Rgb>,
    committed: Vec<Rgb>,
    commits: u64,
}

/// Simulated pixel strip.
///
/// Clones share the same frame buffers, so a test can keep a handle while the
/// interpreter owns another.
#[derive(Debug, Clone)]
pub struct SimulatedPixelStrip {
    state: Arc<Mutex<StripState>>,
}

impl SimulatedPixelStrip {
    /// Create a strip of `len` elements, all off.
    pub fn new(len: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(StripState {
                staged: vec![Rgb::OFF; len],
                committed: vec![Rgb::OFF; len],
                commits: 0,
            })),
        }
    }

    /// Colors currently visible.
    pub fn committed(&self) -> Vec<Rgb> {
        self.state.lock().committed.clone()
    }

    /// Colors staged but not necessarily visible.
    pub fn staged(&self) -> Vec<Rgb> {
        self.state.lock().staged.clone()
    }

    /// Number of commits so far.
    pub fn commit_count(&self) -> u64 {
        self.state.lock().commits
    }
}

impl PixelStrip for SimulatedPixelStrip {
    fn len(&self) -> usize {
        self.state.lock().staged.len()
    }

    fn set(&mut self, index: usize, color: Rgb) -> Result<(), HalError> {
        let mut state = self.state.lock();
        let len = state.staged.len();
        let slot = state.staged.get_mut(index).ok_or_else(|| {
            HalError::ConfigError(format!("pixel index {index} out of range (len {len})"))
        })?;
        *slot = color;
        Ok(())
    }

    fn fill(&mut self, color: Rgb) -> Result<(), HalError> {
        self.state.lock().staged.fill(color);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), HalError> {
        let mut state = self.state.lock();
        let StripState {
            staged,
            committed,
            commits,
        } = &mut *state;
        committed.copy_from_slice(staged);
        *commits += 1;
        debug!(commits = *commits, "Pixel frame committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_not_visible_until_commit() {
        let mut strip = SimulatedPixelStrip::new(4);
        let observer = strip.clone();
        strip.set(2, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(observer.committed()[2], Rgb::OFF);
        assert_eq!(observer.staged()[2], Rgb::new(1, 2, 3));

        strip.commit().unwrap();
        assert_eq!(observer.committed()[2], Rgb::new(1, 2, 3));
        assert_eq!(observer.commit_count(), 1);
    }

    #[test]
    fn fill_sets_every_element() {
        let mut strip = SimulatedPixelStrip::new(3);
        strip.fill(Rgb::new(9, 9, 9)).unwrap();
        strip.commit().unwrap();
        assert!(strip.committed().iter().all(|c| *c == Rgb::new(9, 9, 9)));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut strip = SimulatedPixelStrip::new(8);
        assert_eq!(strip.len(), 8);
        assert!(!strip.is_empty());
        assert!(matches!(
            strip.set(8, Rgb::OFF),
            Err(HalError::ConfigError(_))
        ));
    }
}
