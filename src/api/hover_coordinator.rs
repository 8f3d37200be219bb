use tracing::{trace, warn};

use crate::core::PixelPoint;
use crate::error::ChartResult;
use crate::interaction::{HighlightTransition, HoverEvent};
use crate::overlay::{OverlayPosition, TooltipContent};
use crate::render::{HighlightUpdate, Renderer};

use super::{ContainerHost, LineChart};

impl<R: Renderer, H: ContainerHost> LineChart<R, H> {
    /// Pointer entered the hit region of sample `sample_index`: move the
    /// marker, grow the circle and show the tooltip.
    ///
    /// Returns the tooltip position, or `None` for an unknown sample.
    pub fn pointer_enter_cell(
        &mut self,
        sample_index: usize,
    ) -> ChartResult<Option<OverlayPosition>> {
        let Some(sample) = self.samples.get(sample_index) else {
            warn!(sample_index, "pointer entered a cell with no sample");
            return Ok(None);
        };

        let transition = self.interaction.on_enter(sample_index, sample);
        let content = TooltipContent {
            lines: vec![
                format!("{}: {}", self.config.x_key, sample.x_value),
                format!("{}: {:.2}", sample.series_key, sample.value),
            ],
            accent: sample.stroke,
        };
        let anchor = sample.position;
        self.push_highlight(transition)?;

        self.refresh_container_width();
        let position = self
            .tooltip
            .show(&mut self.host, anchor, &content, &self.resize);
        trace!(sample_index, "cell entered");
        Ok(Some(position))
    }

    /// Pointer left the hit region of sample `sample_index`.
    pub fn pointer_leave_cell(&mut self, sample_index: usize) -> ChartResult<()> {
        let transition = self.interaction.on_leave(sample_index);
        self.push_highlight(transition)?;
        self.tooltip.hide(&mut self.host);
        trace!(sample_index, "cell left");
        Ok(())
    }

    /// Hit-tests a plot-internal pointer position and dispatches leave/enter
    /// when the cell under the pointer changes.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<usize>> {
        let point = PixelPoint::new(x, y);
        let target = self.index.locate(point);
        let events = self.interaction.on_pointer_move(point, target);
        for event in events {
            self.dispatch(event)?;
        }
        Ok(target)
    }

    /// Pointer left the plot entirely.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        let events = self.interaction.on_pointer_leave();
        for event in events {
            self.dispatch(event)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, event: HoverEvent) -> ChartResult<()> {
        match event {
            HoverEvent::Enter(index) => self.pointer_enter_cell(index).map(|_| ()),
            HoverEvent::Leave(index) => self.pointer_leave_cell(index),
        }
    }

    fn push_highlight(&mut self, transition: HighlightTransition) -> ChartResult<()> {
        let marker = self.interaction.marker();
        if let Some(scene) = self.scene.as_mut() {
            scene.marker = marker;
            if let Some(circle) = scene.highlight_circles.get_mut(transition.sample_index) {
                circle.radius = transition.target_radius;
            }
        }
        self.renderer
            .highlight(&HighlightUpdate { transition, marker })
    }

    /// Re-observes the container width if it moved since the last resize
    /// notification, so the tooltip never uses a stale scale factor.
    fn refresh_container_width(&mut self) {
        let Some(width) = self.host.container_width(&self.container) else {
            return;
        };
        if width != self.resize.current_width() {
            self.resize.observe(width);
        }
    }
}
