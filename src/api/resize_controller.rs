use tracing::{debug, trace};

use crate::render::Renderer;

use super::{ContainerHost, LineChart};

impl<R: Renderer, H: ContainerHost> LineChart<R, H> {
    /// Resize notification from the host.
    ///
    /// Only the overlay scale factor changes: the drawing surface rescales
    /// through its view box, and the tessellation keeps its coordinates.
    pub fn on_resize(&mut self, container_width: f64) -> f64 {
        let factor = self.resize.observe(container_width);
        trace!(container_width, scale_factor = factor, "resize observed");
        factor
    }

    /// Releases the resize subscription and removes the owned tooltip.
    /// Runs on drop; calling it twice is harmless.
    pub fn teardown(&mut self) {
        if let Some(listener) = self.resize_listener.take() {
            self.host.unsubscribe_resize(listener);
            self.tooltip.hide(&mut self.host);
            debug!(listener = listener.0, "line chart torn down");
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.resize_listener.is_some()
    }
}

impl<R: Renderer, H: ContainerHost> Drop for LineChart<R, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
