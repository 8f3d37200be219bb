use tracing::{debug, warn};

use crate::core::{
    CardinalCurve, Color, CurveGeometry, PathSampler, PixelPoint, SamplePoint, ScaleId,
    SeriesTag, SpatialIndex,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::MarkerState;
use crate::render::{
    ChartScene, CirclePrimitive, HitRegion, Legend, LegendEntry, PathGeometry, Renderer,
    SeriesPath,
};

use super::axis_scene_builder::AxisSceneBuilder;
use super::{ContainerHost, LineChart, SeriesSpec};

/// Hit regions are nearly invisible white polygons with a faint outline.
pub const HIT_REGION_FILL: Color = Color::WHITE;
pub const HIT_REGION_STROKE: Color = Color::rgb(156.0 / 255.0, 156.0 / 255.0, 156.0 / 255.0);
pub const HIT_REGION_STROKE_WIDTH_PX: f64 = 1.0;
pub const HIT_REGION_OPACITY: f64 = 0.1;

/// Series after key validation and stroke lookup.
struct ResolvedSeries<'a> {
    key: &'a str,
    class_name: Option<&'a str>,
    stroke: Option<Color>,
}

impl<R: Renderer, H: ContainerHost> LineChart<R, H> {
    /// Builds the structural scene (view box, axes, marker, empty hit-region
    /// group) and renders it. Further calls are no-ops.
    pub fn draw_chart(&mut self) -> ChartResult<()> {
        if self.scene.is_some() {
            debug!("chart structure already drawn");
            return Ok(());
        }

        let scene = ChartScene {
            view_box: self.view_box(),
            origin: PixelPoint::new(self.margin.left, self.margin.top),
            clip: self.scales.plot(),
            x_axis: AxisSceneBuilder::x_axis(&self.scales, &self.config),
            y_axis: AxisSceneBuilder::y_axis(&self.scales, &self.config),
            series: Vec::new(),
            hit_regions: Vec::new(),
            highlight_circles: Vec::new(),
            marker: MarkerState::default(),
            legend: self.config.legend.map(|placement| Legend {
                placement,
                entries: Vec::new(),
            }),
        };
        self.renderer.render(&scene)?;
        debug!(
            x_ticks = scene.x_axis.ticks.len(),
            y_ticks = scene.y_axis.ticks.len(),
            "chart structure drawn"
        );
        self.scene = Some(scene);
        Ok(())
    }

    /// Draws `series` over the attached data and rebuilds the hit-test
    /// samples and their tessellation from scratch.
    ///
    /// Every descriptor is checked before anything is replaced, so a missing
    /// `y_key` leaves the previous pass intact. The new pass is committed
    /// only once the renderer accepts it.
    pub fn draw_lines(&mut self, series: &[SeriesSpec]) -> ChartResult<()> {
        if self.scene.is_none() {
            return Err(ChartError::ChartNotDrawn);
        }
        let resolved = self.resolve_series(series)?;

        let sampler = PathSampler::new(&self.scales);
        let x_key = self.config.x_key.as_str();
        let mut paths = Vec::with_capacity(resolved.len());
        let mut samples: Vec<SamplePoint> = Vec::new();
        for line in &resolved {
            let points = self.path_points(line.key);
            let tag = SeriesTag {
                key: line.key,
                stroke: line.stroke,
            };

            let geometry = if self.config.interpolate {
                let curve = CardinalCurve::new(&points);
                if curve.total_length() <= 0.0 {
                    warn!(series = line.key, "smoothed curve has zero length");
                }
                samples.extend(sampler.curve_samples(&curve, &tag));
                match curve.start() {
                    Some(start) => PathGeometry::Cubic {
                        start,
                        segments: curve.segments().to_vec(),
                    },
                    None => PathGeometry::Polyline(Vec::new()),
                }
            } else {
                samples.extend(sampler.linear_samples(&self.rows, x_key, &tag));
                PathGeometry::Polyline(points)
            };

            paths.push(SeriesPath {
                key: line.key.to_owned(),
                class_name: line.class_name.map(str::to_owned),
                stroke: line.stroke,
                geometry,
            });
        }

        let index = SpatialIndex::build(&samples, self.scales.plot());
        debug!(
            series = paths.len(),
            samples = samples.len(),
            cells = index.len(),
            "lines drawn"
        );

        let Some(current) = self.scene.as_ref() else {
            return Err(ChartError::ChartNotDrawn);
        };
        let mut scene = current.clone();
        scene.clear_series();
        if let Some(legend) = &mut scene.legend {
            legend.entries = paths
                .iter()
                .map(|path| LegendEntry {
                    key: path.key.clone(),
                    class_name: path.class_name.clone(),
                    stroke: path.stroke,
                })
                .collect();
        }
        scene.hit_regions = index
            .cells()
            .iter()
            .map(|cell| HitRegion {
                sample_index: cell.sample_index,
                path: cell.path_data(),
                fill: HIT_REGION_FILL,
                stroke: HIT_REGION_STROKE,
                stroke_width: HIT_REGION_STROKE_WIDTH_PX,
                opacity: HIT_REGION_OPACITY,
            })
            .collect();
        scene.highlight_circles = samples
            .iter()
            .enumerate()
            .map(|(id, sample)| CirclePrimitive {
                id,
                center: sample.position,
                radius: 0.0,
                stroke: sample.stroke,
                fill: None,
            })
            .collect();
        scene.series = paths;
        self.renderer.render(&scene)?;

        // Scene, samples and index only change together.
        self.tooltip.hide(&mut self.host);
        self.interaction.reset();
        self.scene = Some(scene);
        self.samples = samples;
        self.index = index;
        Ok(())
    }

    fn resolve_series<'a>(
        &self,
        series: &'a [SeriesSpec],
    ) -> ChartResult<Vec<ResolvedSeries<'a>>> {
        series
            .iter()
            .enumerate()
            .map(|(index, spec)| -> ChartResult<ResolvedSeries<'a>> {
                let key = spec
                    .y_key
                    .as_deref()
                    .ok_or(ChartError::MissingSeriesKey { index })?;
                let class_name = spec.class_name.as_deref();
                let stroke = class_name.and_then(|class| {
                    let stroke = self.host.stroke_for_class(class);
                    if stroke.is_none() {
                        warn!(class, "no stroke registered for series class");
                    }
                    stroke
                });
                Ok(ResolvedSeries {
                    key,
                    class_name,
                    stroke,
                })
            })
            .collect()
    }

    /// Drawn vertices of one series; x is read with integer semantics.
    fn path_points(&self, y_key: &str) -> Vec<PixelPoint> {
        let x_key = self.config.x_key.as_str();
        self.rows
            .iter()
            .map(|row| {
                PixelPoint::new(
                    self.scales.project(ScaleId::X, row.get(x_key).trunc()),
                    self.scales.project(ScaleId::Y, row.get(y_key)),
                )
            })
            .collect()
    }
}
