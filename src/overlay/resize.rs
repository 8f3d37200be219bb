use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::Margin;

/// Tracks the container's width against its first-observed width.
///
/// The drawing surface rescales itself as a view box; only elements placed
/// outside it (the tooltip overlay) need `scale_factor` and `scaled_margin`
/// to line up with the drawn geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeCoordinator {
    original_width: f64,
    current_width: f64,
    margin: Margin,
    scale_factor: f64,
    scaled_margin: Margin,
}

impl ResizeCoordinator {
    #[must_use]
    pub fn new(original_width: f64, margin: Margin) -> Self {
        let mut coordinator = Self {
            original_width,
            current_width: original_width,
            margin,
            scale_factor: 1.0,
            scaled_margin: margin,
        };
        coordinator.observe(original_width);
        coordinator
    }

    /// Records a new container width and recomputes the scale factor and the
    /// per-side scaled margin. Returns the new scale factor.
    pub fn observe(&mut self, current_width: f64) -> f64 {
        self.current_width = current_width;
        let factor = current_width / self.original_width;
        if factor.is_finite() && factor > 0.0 {
            self.scale_factor = factor;
        } else {
            warn!(
                original_width = self.original_width,
                current_width, "unusable container width, keeping previous scale factor"
            );
        }
        self.scaled_margin = self.margin.scaled(self.scale_factor);
        trace!(scale_factor = self.scale_factor, "container resized");
        self.scale_factor
    }

    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn scaled_margin(&self) -> Margin {
        self.scaled_margin
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn original_width(&self) -> f64 {
        self.original_width
    }

    #[must_use]
    pub fn current_width(&self) -> f64 {
        self.current_width
    }
}
