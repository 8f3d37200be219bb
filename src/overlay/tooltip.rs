use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Color, PixelPoint};
use crate::overlay::ResizeCoordinator;

/// Vertical gap between the anchor and the tooltip edge.
pub const TOOLTIP_GAP_PX: f64 = 20.0;
/// Inset applied when the tooltip is pushed back inside the viewport.
pub const TOOLTIP_EDGE_INSET_PX: f64 = 5.0;
/// Coordinate used to park the overlay while it is measured.
pub const OFFSCREEN_PX: f64 = -1000.0;

/// Identifier of an overlay element created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

/// Rendered outer size of an overlay, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlaySize {
    pub width: f64,
    pub height: f64,
}

/// Visible window metrics used for clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    pub scroll_top: f64,
}

/// Absolute position and opacity applied to an overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
}

impl OverlayPosition {
    #[must_use]
    pub const fn offscreen() -> Self {
        Self {
            left: OFFSCREEN_PX,
            top: OFFSCREEN_PX,
            opacity: 0.0,
        }
    }
}

/// Tooltip text, one entry per line, plus the series accent color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub lines: Vec<String>,
    pub accent: Option<Color>,
}

impl TooltipContent {
    /// Lines joined with `<br>` for markup-based hosts.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.lines.join("<br>")
    }
}

/// Host capability for the transient overlay element.
///
/// The overlay lives outside the scalable drawing surface, so positions are
/// in viewport pixels.
pub trait OverlaySurface {
    /// Appends a new overlay element to the chart container at `position`.
    fn create_overlay(&mut self, content: &TooltipContent, position: OverlayPosition) -> OverlayId;

    /// Outer size of a created overlay, padding included.
    fn measure_overlay(&self, id: OverlayId) -> OverlaySize;

    fn place_overlay(&mut self, id: OverlayId, position: OverlayPosition);

    /// Removes the element entirely.
    fn remove_overlay(&mut self, id: OverlayId);

    fn viewport(&self) -> ViewportMetrics;
}

/// Places a tooltip of `size` above `anchor` (plot-internal pixels).
///
/// The tooltip is centred horizontally on the anchor, shifted by the scaled
/// left margin, pushed back inside the viewport horizontally, and flipped
/// below the anchor when it would start above the scroll offset. The result
/// is multiplied by the current scale factor.
#[must_use]
pub fn compute_placement(
    anchor: PixelPoint,
    size: OverlaySize,
    viewport: ViewportMetrics,
    resize: &ResizeCoordinator,
) -> OverlayPosition {
    let anchor_x = anchor.x.trunc();
    let anchor_y = anchor.y.trunc();

    let mut left = anchor_x - size.width / 2.0 + resize.scaled_margin().left;
    let mut top = anchor_y - size.height - TOOLTIP_GAP_PX;

    if left < 0.0 {
        left = TOOLTIP_EDGE_INSET_PX;
    }
    if left + size.width > viewport.width {
        left = viewport.width - size.width - TOOLTIP_EDGE_INSET_PX;
    }
    if viewport.scroll_top > top {
        top = anchor_y + TOOLTIP_GAP_PX;
    }

    let factor = resize.scale_factor();
    OverlayPosition {
        left: left * factor,
        top: top * factor,
        opacity: 1.0,
    }
}

/// Owns at most one tooltip overlay at a time.
#[derive(Debug, Default)]
pub struct TooltipPlacer {
    active: Option<OverlayId>,
}

impl TooltipPlacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<OverlayId> {
        self.active
    }

    /// Measures, places and reveals a new tooltip, removing any tooltip this
    /// placer still owns first.
    pub fn show<S: OverlaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
        anchor: PixelPoint,
        content: &TooltipContent,
        resize: &ResizeCoordinator,
    ) -> OverlayPosition {
        self.hide(surface);

        let id = surface.create_overlay(content, OverlayPosition::offscreen());
        let size = surface.measure_overlay(id);
        let position = compute_placement(anchor, size, surface.viewport(), resize);
        surface.place_overlay(id, position);
        self.active = Some(id);
        trace!(
            overlay = id.0,
            left = position.left,
            top = position.top,
            "tooltip shown"
        );
        position
    }

    /// Removes the owned tooltip, leaving any other overlay untouched.
    pub fn hide<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(id) = self.active.take() {
            surface.remove_overlay(id);
            trace!(overlay = id.0, "tooltip removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlaySize, ViewportMetrics, compute_placement};
    use crate::core::{Margin, PixelPoint};
    use crate::overlay::ResizeCoordinator;

    const VIEWPORT: ViewportMetrics = ViewportMetrics {
        width: 1024.0,
        height: 768.0,
        scroll_top: 0.0,
    };
    const SIZE: OverlaySize = OverlaySize {
        width: 120.0,
        height: 40.0,
    };

    fn resize() -> ResizeCoordinator {
        ResizeCoordinator::new(800.0, Margin::new(10.0, 20.0, 60.0, 50.0))
    }

    #[test]
    fn tooltip_sits_centred_above_anchor() {
        let pos = compute_placement(PixelPoint::new(300.0, 200.0), SIZE, VIEWPORT, &resize());
        assert_eq!(pos.left, 300.0 - 60.0 + 50.0);
        assert_eq!(pos.top, 200.0 - 40.0 - 20.0);
        assert_eq!(pos.opacity, 1.0);
    }

    #[test]
    fn anchor_coordinates_are_truncated() {
        let pos = compute_placement(PixelPoint::new(300.9, 200.7), SIZE, VIEWPORT, &resize());
        assert_eq!(pos.left, 290.0);
        assert_eq!(pos.top, 140.0);
    }

    #[test]
    fn left_edge_clamps_to_inset() {
        let pos = compute_placement(PixelPoint::new(0.0, 200.0), SIZE, VIEWPORT, &resize());
        assert_eq!(pos.left, 5.0);
    }

    #[test]
    fn right_edge_clamps_inside_viewport() {
        let pos = compute_placement(PixelPoint::new(1010.0, 200.0), SIZE, VIEWPORT, &resize());
        assert_eq!(pos.left, 1024.0 - 120.0 - 5.0);
    }

    #[test]
    fn flips_below_when_above_scroll_offset() {
        let pos = compute_placement(PixelPoint::new(300.0, 30.0), SIZE, VIEWPORT, &resize());
        assert_eq!(pos.top, 50.0);

        let scrolled = ViewportMetrics {
            scroll_top: 200.0,
            ..VIEWPORT
        };
        let pos = compute_placement(PixelPoint::new(300.0, 210.0), SIZE, scrolled, &resize());
        assert_eq!(pos.top, 230.0);
    }

    #[test]
    fn placement_is_scaled_by_resize_factor() {
        let mut resize = resize();
        resize.observe(400.0);
        let pos = compute_placement(PixelPoint::new(300.0, 200.0), SIZE, VIEWPORT, &resize);
        assert_eq!(pos.left, (300.0 - 60.0 + 25.0) * 0.5);
        assert_eq!(pos.top, 140.0 * 0.5);
    }
}
