use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{Color, CubicSegment, PixelPoint, PlotSize};
use crate::error::ChartResult;
use crate::interaction::{HighlightTransition, MarkerState};
use crate::render::{CirclePrimitive, HitRegion, LinePrimitive, TextPrimitive};

/// Where the host should lay out the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPlacement {
    Top,
    Right,
    Bottom,
    Left,
}

/// One tick mark on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    /// Offset along the axis in plot pixels.
    pub position: f64,
    /// `None` when the tick is drawn without a label.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScene {
    pub visible: bool,
    pub ticks: Vec<AxisTick>,
    /// Distance between tick labels and the axis line.
    pub tick_padding: f64,
    pub grid_lines: Vec<LinePrimitive>,
    pub title: TextPrimitive,
}

/// Geometry of one drawn series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathGeometry {
    /// Straight segments through every projected row.
    Polyline(Vec<PixelPoint>),
    /// Smoothed curve: a move-to followed by cubic pieces.
    Cubic {
        start: PixelPoint,
        segments: Vec<CubicSegment>,
    },
}

impl PathGeometry {
    /// SVG-style path data for hosts that draw from strings.
    #[must_use]
    pub fn path_data(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Polyline(points) => {
                for (i, p) in points.iter().enumerate() {
                    let command = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(out, "{command}{},{}", p.x, p.y);
                }
            }
            Self::Cubic { start, segments } => {
                let _ = write!(out, "M{},{}", start.x, start.y);
                for s in segments {
                    let _ = write!(
                        out,
                        "C{},{},{},{},{},{}",
                        s.control1.x, s.control1.y, s.control2.x, s.control2.y, s.to.x, s.to.y
                    );
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub key: String,
    pub class_name: Option<String>,
    pub stroke: Option<Color>,
    pub geometry: PathGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub class_name: Option<String>,
    pub stroke: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub placement: LegendPlacement,
    pub entries: Vec<LegendEntry>,
}

/// Everything a backend needs to draw one chart.
///
/// Coordinates are plot-internal; the backend translates by `origin` and
/// scales the whole surface through `view_box`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub view_box: PlotSize,
    pub origin: PixelPoint,
    /// Clip rectangle for series paths, anchored at the origin.
    pub clip: PlotSize,
    pub x_axis: AxisScene,
    pub y_axis: AxisScene,
    pub series: Vec<SeriesPath>,
    pub hit_regions: Vec<HitRegion>,
    pub highlight_circles: Vec<CirclePrimitive>,
    /// Drawn with [`crate::interaction::MARKER_RADIUS_PX`].
    pub marker: MarkerState,
    pub legend: Option<Legend>,
}

impl ChartScene {
    /// Checks axis geometry. Series geometry may legitimately carry NaN
    /// coordinates for missing values and is not checked.
    pub fn validate(&self) -> ChartResult<()> {
        for axis in [&self.x_axis, &self.y_axis] {
            axis.title.validate()?;
            for line in &axis.grid_lines {
                line.validate()?;
            }
        }
        Ok(())
    }

    /// Clears everything produced by a line pass, keeping the axes.
    pub fn clear_series(&mut self) {
        self.series.clear();
        self.hit_regions.clear();
        self.highlight_circles.clear();
        self.marker.visible = false;
        if let Some(legend) = &mut self.legend {
            legend.entries.clear();
        }
    }
}

/// Incremental change pushed to the backend on hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightUpdate {
    pub transition: HighlightTransition,
    pub marker: MarkerState,
}
