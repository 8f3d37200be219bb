use serde::{Deserialize, Serialize};

use crate::core::{Color, CurveGeometry, DataRow, PixelPoint, ScaleId, ScaleManager};

/// How a series path is turned into hit-test seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SamplingMode {
    /// One seed per data row, projected through the scales.
    #[default]
    Linear,
    /// Seeds evenly spaced along the arc length of the smoothed curve.
    Interpolated,
}

/// A hit-test seed in pixel space, tagged with the data it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub position: PixelPoint,
    /// Inverted x, rounded to the nearest integral category.
    pub x_value: f64,
    /// Inverted y.
    pub value: f64,
    pub series_key: String,
    pub stroke: Option<Color>,
}

/// Series identity carried onto every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTag<'a> {
    pub key: &'a str,
    pub stroke: Option<Color>,
}

/// Produces discrete seeds from series data or drawn curves.
#[derive(Debug, Clone, Copy)]
pub struct PathSampler<'a> {
    scales: &'a ScaleManager,
}

impl<'a> PathSampler<'a> {
    #[must_use]
    pub fn new(scales: &'a ScaleManager) -> Self {
        Self { scales }
    }

    /// Projects every row's `(x_key, y_key)` pair into pixel space.
    ///
    /// Missing values project to NaN; callers decide whether to keep them.
    #[must_use]
    pub fn project(&self, rows: &[DataRow], x_key: &str, y_key: &str) -> Vec<PixelPoint> {
        rows.iter()
            .map(|row| {
                PixelPoint::new(
                    self.scales.project(ScaleId::X, row.get(x_key)),
                    self.scales.project(ScaleId::Y, row.get(y_key)),
                )
            })
            .collect()
    }

    /// Exactly one sample per row.
    #[must_use]
    pub fn linear_samples(
        &self,
        rows: &[DataRow],
        x_key: &str,
        series: &SeriesTag<'_>,
    ) -> Vec<SamplePoint> {
        self.annotate(self.project(rows, x_key, series.key), series)
    }

    /// Samples taken every [`sampling_step`] along the curve.
    #[must_use]
    pub fn curve_samples(
        &self,
        curve: &impl CurveGeometry,
        series: &SeriesTag<'_>,
    ) -> Vec<SamplePoint> {
        self.annotate(walk_arc_length(curve), series)
    }

    fn annotate(&self, positions: Vec<PixelPoint>, series: &SeriesTag<'_>) -> Vec<SamplePoint> {
        positions
            .into_iter()
            .map(|position| SamplePoint {
                position,
                x_value: (self.scales.invert(ScaleId::X, position.x) + 0.5).floor(),
                value: self.scales.invert(ScaleId::Y, position.y),
                series_key: series.key.to_owned(),
                stroke: series.stroke,
            })
            .collect()
    }
}

/// Arc-length step: half the average command length, so every drawn
/// segment receives at least two samples.
///
/// `None` for empty or zero-length curves.
#[must_use]
pub fn sampling_step(curve: &impl CurveGeometry) -> Option<f64> {
    let length = curve.total_length();
    let segments = curve.segment_count();
    if segments == 0 || !length.is_finite() || length <= 0.0 {
        return None;
    }
    Some(length / (segments as f64 * 2.0))
}

/// Positions at `0, step, 2*step, ..` up to and including the curve end.
#[must_use]
pub fn walk_arc_length(curve: &impl CurveGeometry) -> Vec<PixelPoint> {
    let Some(step) = sampling_step(curve) else {
        return curve.point_at_length(0.0).into_iter().collect();
    };

    let length = curve.total_length();
    let steps = (length / step + 1e-9).floor() as usize;
    (0..=steps)
        .filter_map(|k| curve.point_at_length(k as f64 * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{PathSampler, SeriesTag, sampling_step, walk_arc_length};
    use crate::core::{CardinalCurve, DataRow, PixelPoint, PlotSize, Polyline, ScaleManager};

    fn scales() -> ScaleManager {
        let mut scales = ScaleManager::new(PlotSize::new(200.0, 100.0), 0.0, 100.0);
        scales.set_domain((0.0, 10.0));
        scales
    }

    #[test]
    fn linear_samples_match_rows_and_invert_back() {
        let scales = scales();
        let rows = vec![
            DataRow::new().with("x", 0.0).with("y", 10.0),
            DataRow::new().with("x", 5.0).with("y", 50.0),
            DataRow::new().with("x", 10.0),
        ];
        let tag = SeriesTag {
            key: "y",
            stroke: None,
        };
        let samples = PathSampler::new(&scales).linear_samples(&rows, "x", &tag);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].position, PixelPoint::new(100.0, 50.0));
        assert_eq!(samples[1].x_value, 5.0);
        assert!((samples[1].value - 50.0).abs() <= 1e-9);
        assert_eq!(samples[1].series_key, "y");
        assert!(samples[2].position.y.is_nan());
    }

    #[test]
    fn step_is_half_the_average_command_length() {
        let line = Polyline::new(&[PixelPoint::new(0.0, 0.0), PixelPoint::new(60.0, 0.0)]);
        assert_eq!(sampling_step(&line), Some(15.0));
        let points = walk_arc_length(&line);
        assert_eq!(points.len(), 5);
        assert_eq!(points.last().copied(), Some(PixelPoint::new(60.0, 0.0)));
    }

    #[test]
    fn zero_length_curve_yields_its_single_point() {
        let line = Polyline::new(&[PixelPoint::new(4.0, 4.0)]);
        assert_eq!(sampling_step(&line), None);
        assert_eq!(walk_arc_length(&line), vec![PixelPoint::new(4.0, 4.0)]);
        assert!(walk_arc_length(&Polyline::new(&[])).is_empty());
    }

    #[test]
    fn curve_samples_round_x_to_categories() {
        let scales = scales();
        let curve = CardinalCurve::new(&[
            PixelPoint::new(0.0, 90.0),
            PixelPoint::new(100.0, 10.0),
            PixelPoint::new(200.0, 50.0),
        ]);
        let tag = SeriesTag {
            key: "y",
            stroke: None,
        };
        let samples = PathSampler::new(&scales).curve_samples(&curve, &tag);
        assert_eq!(samples.len(), 7);
        for sample in &samples {
            assert_eq!(sample.x_value.fract(), 0.0);
        }
    }
}
