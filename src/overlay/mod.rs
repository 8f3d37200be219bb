//! Elements positioned outside the scalable drawing surface.

mod resize;
mod tooltip;

pub use resize::ResizeCoordinator;
pub use tooltip::{
    OFFSCREEN_PX, OverlayId, OverlayPosition, OverlaySize, OverlaySurface, TOOLTIP_EDGE_INSET_PX,
    TOOLTIP_GAP_PX, TooltipContent, TooltipPlacer, ViewportMetrics, compute_placement,
};
