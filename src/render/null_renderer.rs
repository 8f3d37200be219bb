use crate::error::ChartResult;
use crate::render::{ChartScene, HighlightUpdate, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates the scene so tests catch invalid axis geometry without
/// a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_series_count: usize,
    pub last_hit_region_count: usize,
    pub last_tick_count: usize,
    pub highlights: Vec<HighlightUpdate>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()> {
        scene.validate()?;
        self.render_count += 1;
        self.last_series_count = scene.series.len();
        self.last_hit_region_count = scene.hit_regions.len();
        self.last_tick_count = scene.x_axis.ticks.len() + scene.y_axis.ticks.len();
        Ok(())
    }

    fn highlight(&mut self, update: &HighlightUpdate) -> ChartResult<()> {
        self.highlights.push(*update);
        Ok(())
    }
}
