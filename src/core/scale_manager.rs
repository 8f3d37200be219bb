use serde::{Deserialize, Serialize};

use crate::core::{DataRow, LinearScale, PlotSize};

/// Minimum tick count requested for either axis, whatever the plot size.
pub const MIN_AXIS_TICKS: f64 = 2.0;
/// Pixels of axis span per requested tick when grid lines are off.
pub const AXIS_PX_PER_TICK: f64 = 50.0;
/// Tick count used when an axis doubles as a grid.
pub const GRID_TICKS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleId {
    X,
    Y,
}

/// Owns the x and y scales of one chart.
///
/// x domain follows the extent of ingested data; y domain is fixed at
/// construction to `[0, max_y]`, niced. `min_y` is retained as configuration
/// but does not participate in the y domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleManager {
    x: LinearScale,
    y: LinearScale,
    plot: PlotSize,
    min_y: f64,
    max_y: f64,
}

impl ScaleManager {
    #[must_use]
    pub fn new(plot: PlotSize, min_y: f64, max_y: f64) -> Self {
        let x = LinearScale::default().with_range(0.0, plot.width);
        let y = LinearScale::new((0.0, max_y), (plot.height, 0.0)).nice(GRID_TICKS);
        Self {
            x,
            y,
            plot,
            min_y,
            max_y,
        }
    }

    #[must_use]
    pub fn x(&self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> LinearScale {
        self.y
    }

    #[must_use]
    pub fn scale(&self, id: ScaleId) -> LinearScale {
        match id {
            ScaleId::X => self.x,
            ScaleId::Y => self.y,
        }
    }

    #[must_use]
    pub fn plot(&self) -> PlotSize {
        self.plot
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Sets the x domain to `[min, max]` of the given extent.
    pub fn set_domain(&mut self, extent: (f64, f64)) {
        self.x = self.x.with_domain(extent.0, extent.1);
    }

    /// Sets the x domain from the finite `x_key` values of `rows`.
    ///
    /// Returns the applied extent, or `None` (domain untouched) when no row
    /// carries a finite x value.
    pub fn fit_x_domain(&mut self, rows: &[DataRow], x_key: &str) -> Option<(f64, f64)> {
        let extent = rows
            .iter()
            .map(|row| row.get(x_key))
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, value| match acc {
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
                None => Some((value, value)),
            })?;
        self.set_domain(extent);
        Some(extent)
    }

    /// Recomputes both ranges for a new plot size; domains are preserved.
    pub fn resize(&mut self, plot: PlotSize) {
        self.plot = plot;
        self.x = self.x.with_range(0.0, plot.width);
        self.y = self.y.with_range(plot.height, 0.0);
    }

    #[must_use]
    pub fn project(&self, id: ScaleId, value: f64) -> f64 {
        self.scale(id).project(value)
    }

    #[must_use]
    pub fn invert(&self, id: ScaleId, pixel: f64) -> f64 {
        self.scale(id).invert(pixel)
    }

    /// Requested x tick count: one per 50 px, never fewer than two. Kept
    /// fractional so step selection sees the exact density.
    #[must_use]
    pub fn x_tick_count(&self) -> f64 {
        span_tick_count(self.plot.width)
    }

    /// Requested y tick count: one per 50 px, never fewer than two.
    #[must_use]
    pub fn y_tick_count(&self) -> f64 {
        span_tick_count(self.plot.height)
    }
}

fn span_tick_count(span_px: f64) -> f64 {
    let raw = span_px / AXIS_PX_PER_TICK;
    if raw.is_finite() && raw > MIN_AXIS_TICKS {
        raw
    } else {
        MIN_AXIS_TICKS
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleId, ScaleManager};
    use crate::core::{DataRow, PlotSize};

    fn rows(xs: &[f64]) -> Vec<DataRow> {
        xs.iter().map(|x| DataRow::new().with("x", *x)).collect()
    }

    #[test]
    fn y_range_is_inverted() {
        let scales = ScaleManager::new(PlotSize::new(400.0, 300.0), 0.0, 100.0);
        assert_eq!(scales.project(ScaleId::Y, 0.0), 300.0);
        assert_eq!(scales.project(ScaleId::Y, 100.0), 0.0);
    }

    #[test]
    fn fit_x_domain_uses_finite_extent() {
        let mut scales = ScaleManager::new(PlotSize::new(400.0, 300.0), 0.0, 100.0);
        let extent = scales.fit_x_domain(&rows(&[3.0, f64::NAN, 1.0, 2.0]), "x");
        assert_eq!(extent, Some((1.0, 3.0)));
        assert_eq!(scales.x().domain(), (1.0, 3.0));
    }

    #[test]
    fn fit_x_domain_ignores_empty_data() {
        let mut scales = ScaleManager::new(PlotSize::new(400.0, 300.0), 0.0, 100.0);
        scales.set_domain((5.0, 9.0));
        assert_eq!(scales.fit_x_domain(&[], "x"), None);
        assert_eq!(scales.x().domain(), (5.0, 9.0));
    }

    #[test]
    fn resize_preserves_domains() {
        let mut scales = ScaleManager::new(PlotSize::new(400.0, 300.0), 0.0, 100.0);
        scales.set_domain((1.0, 3.0));
        scales.resize(PlotSize::new(800.0, 600.0));
        assert_eq!(scales.x().domain(), (1.0, 3.0));
        assert_eq!(scales.y().domain(), (0.0, 100.0));
        assert_eq!(scales.project(ScaleId::X, 3.0), 800.0);
        assert_eq!(scales.project(ScaleId::Y, 0.0), 600.0);
    }

    #[test]
    fn tick_counts_never_drop_below_two() {
        let scales = ScaleManager::new(PlotSize::new(-40.0, 0.0), 0.0, 100.0);
        assert_eq!(scales.x_tick_count(), 2.0);
        assert_eq!(scales.y_tick_count(), 2.0);

        let scales = ScaleManager::new(PlotSize::new(730.0, 295.0), 0.0, 100.0);
        assert_eq!(scales.x_tick_count(), 14.6);
        assert_eq!(scales.y_tick_count(), 5.9);
    }

    #[test]
    fn min_y_is_kept_but_not_applied() {
        let scales = ScaleManager::new(PlotSize::new(400.0, 300.0), 20.0, 100.0);
        assert_eq!(scales.min_y(), 20.0);
        assert_eq!(scales.y().domain(), (0.0, 100.0));
    }
}
