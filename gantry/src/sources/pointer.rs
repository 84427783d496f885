//! Pointer clicks on a plotted work area.
//!
//! The plotting front end is external; it reports clicks in data
//! coordinates [mm], or `None` when the click landed outside the axes.

use gantry_common::motion::target::TargetStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns clicks into absolute targets.
#[derive(Debug, Clone)]
pub struct PointerSource {
    targets: Arc<TargetStore>,
}

impl PointerSource {
    pub fn new(targets: Arc<TargetStore>) -> Self {
        Self { targets }
    }

    /// Set both targets from a click. Returns `false` when the click was
    /// ignored (a coordinate missing, or one the store cannot represent).
    pub fn click(&self, x: Option<f64>, y: Option<f64>) -> bool {
        let (Some(x), Some(y)) = (x, y) else {
            debug!(?x, ?y, "Click outside work area ignored");
            return false;
        };
        match self.targets.set_targets(x, y) {
            Ok(()) => {
                info!("Target: X={:.3} mm, Y={:.3} mm", x, y);
                true
            }
            Err(e) => {
                warn!("Click ignored: {}", e);
                false
            }
        }
    }
}
