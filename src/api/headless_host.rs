use indexmap::{IndexMap, IndexSet};

use crate::core::Color;
use crate::overlay::{
    OverlayId, OverlayPosition, OverlaySize, OverlaySurface, TooltipContent, ViewportMetrics,
};

use super::{ContainerHost, ListenerId};

/// Overlay element as the headless host stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOverlay {
    pub content: TooltipContent,
    pub position: OverlayPosition,
}

/// In-memory host for tests and server-side use.
///
/// Containers, class strokes and the overlay size are fixed by the caller;
/// overlays and resize listeners are recorded so their lifecycle can be
/// inspected.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    containers: IndexMap<String, f64>,
    strokes: IndexMap<String, Color>,
    viewport: ViewportMetrics,
    overlay_size: OverlaySize,
    overlays: IndexMap<OverlayId, HeadlessOverlay>,
    listeners: IndexSet<ListenerId>,
    next_overlay: u64,
    next_listener: u64,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(viewport: ViewportMetrics) -> Self {
        Self {
            containers: IndexMap::new(),
            strokes: IndexMap::new(),
            viewport,
            overlay_size: OverlaySize {
                width: 100.0,
                height: 40.0,
            },
            overlays: IndexMap::new(),
            listeners: IndexSet::new(),
            next_overlay: 1,
            next_listener: 1,
        }
    }

    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>, width: f64) -> Self {
        self.containers.insert(id.into(), width);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, class_name: impl Into<String>, stroke: Color) -> Self {
        self.strokes.insert(class_name.into(), stroke);
        self
    }

    /// Size reported for every created overlay.
    #[must_use]
    pub fn with_overlay_size(mut self, size: OverlaySize) -> Self {
        self.overlay_size = size;
        self
    }

    pub fn set_container_width(&mut self, id: &str, width: f64) {
        if let Some(current) = self.containers.get_mut(id) {
            *current = width;
        }
    }

    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn overlays(&self) -> &IndexMap<OverlayId, HeadlessOverlay> {
        &self.overlays
    }

    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }
}

impl OverlaySurface for HeadlessHost {
    fn create_overlay(&mut self, content: &TooltipContent, position: OverlayPosition) -> OverlayId {
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.insert(
            id,
            HeadlessOverlay {
                content: content.clone(),
                position,
            },
        );
        id
    }

    fn measure_overlay(&self, _id: OverlayId) -> OverlaySize {
        self.overlay_size
    }

    fn place_overlay(&mut self, id: OverlayId, position: OverlayPosition) {
        if let Some(overlay) = self.overlays.get_mut(&id) {
            overlay.position = position;
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.shift_remove(&id);
    }

    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }
}

impl ContainerHost for HeadlessHost {
    fn container_width(&self, container: &str) -> Option<f64> {
        self.containers.get(container).copied()
    }

    fn stroke_for_class(&self, class_name: &str) -> Option<Color> {
        self.strokes.get(class_name).copied()
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id);
        id
    }

    fn unsubscribe_resize(&mut self, listener: ListenerId) {
        self.listeners.shift_remove(&listener);
    }
}
