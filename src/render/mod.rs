mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{CirclePrimitive, HitRegion, LinePrimitive, TextAnchor, TextPrimitive};
pub use scene::{
    AxisScene, AxisTick, ChartScene, HighlightUpdate, Legend, LegendEntry, LegendPlacement,
    PathGeometry, SeriesPath,
};

pub use crate::core::Color;
use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `ChartScene` so drawing code stays
/// isolated from scales, sampling and hit-testing.
pub trait Renderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()>;

    /// Applies a hover change (circle radius animation and marker state)
    /// without redrawing the scene.
    fn highlight(&mut self, update: &HighlightUpdate) -> ChartResult<()>;
}
