use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, PixelPoint, SamplePoint};

/// Duration of the highlight-circle grow/shrink animation.
pub const HIGHLIGHT_DURATION_MS: u32 = 250;
/// Radius a highlight circle grows to while its cell is hovered.
pub const HIGHLIGHT_RADIUS_PX: f64 = 7.0;
/// Radius of the marker dot that follows the hovered sample.
pub const MARKER_RADIUS_PX: f64 = 1.5;

/// Hover transition against one Voronoi cell (identified by sample index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverEvent {
    Enter(usize),
    Leave(usize),
}

/// Radius animation requested for the highlight circle of one sample.
///
/// Transitions are not cancellable; a later request for the same circle
/// simply overrides the earlier target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightTransition {
    pub sample_index: usize,
    pub target_radius: f64,
    pub duration_ms: u32,
}

/// The single marker dot shown on the hovered sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerState {
    pub visible: bool,
    pub position: PixelPoint,
    pub fill: Option<Color>,
}

/// Hover state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    active_cell: Option<usize>,
    cursor: Option<PixelPoint>,
    marker: MarkerState,
}

impl InteractionState {
    #[must_use]
    pub fn active_cell(self) -> Option<usize> {
        self.active_cell
    }

    #[must_use]
    pub fn cursor(self) -> Option<PixelPoint> {
        self.cursor
    }

    #[must_use]
    pub fn marker(self) -> MarkerState {
        self.marker
    }

    /// Records the pointer and returns the leave/enter pair needed to move
    /// hover from the active cell to `target`.
    pub fn on_pointer_move(
        &mut self,
        position: PixelPoint,
        target: Option<usize>,
    ) -> SmallVec<[HoverEvent; 2]> {
        self.cursor = Some(position);
        self.transitions_to(target)
    }

    /// Pointer left the plot: leave whatever cell is active.
    pub fn on_pointer_leave(&mut self) -> SmallVec<[HoverEvent; 2]> {
        self.cursor = None;
        self.transitions_to(None)
    }

    fn transitions_to(&self, target: Option<usize>) -> SmallVec<[HoverEvent; 2]> {
        let mut events = SmallVec::new();
        if self.active_cell == target {
            return events;
        }
        if let Some(previous) = self.active_cell {
            events.push(HoverEvent::Leave(previous));
        }
        if let Some(next) = target {
            events.push(HoverEvent::Enter(next));
        }
        events
    }

    /// Moves the marker onto `sample` and grows its circle.
    pub fn on_enter(&mut self, sample_index: usize, sample: &SamplePoint) -> HighlightTransition {
        self.active_cell = Some(sample_index);
        self.marker = MarkerState {
            visible: true,
            position: sample.position,
            fill: sample.stroke,
        };
        HighlightTransition {
            sample_index,
            target_radius: HIGHLIGHT_RADIUS_PX,
            duration_ms: HIGHLIGHT_DURATION_MS,
        }
    }

    /// Hides the marker and shrinks the circle of `sample_index`.
    pub fn on_leave(&mut self, sample_index: usize) -> HighlightTransition {
        if self.active_cell == Some(sample_index) {
            self.active_cell = None;
        }
        self.marker.visible = false;
        HighlightTransition {
            sample_index,
            target_radius: 0.0,
            duration_ms: HIGHLIGHT_DURATION_MS,
        }
    }

    /// Forgets hover state; used when the tessellation is rebuilt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
