//! Curve interrogation for arc-length sampling.
//!
//! Any rendering backend that draws a series path must be able to answer
//! two questions about it: how long it is, and where the point at a given
//! arc length lies. [`CurveGeometry`] is that capability. The two built-in
//! curves answer it from their own parametrization by flattening into a
//! cumulative arc-length table, so no drawing backend is needed.

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// Tension of the cardinal interpolation used for smoothed series.
pub const DEFAULT_CARDINAL_TENSION: f64 = 0.7;

/// Chords per cubic segment when measuring arc length.
const FLATTEN_STEPS: usize = 32;

/// Arc-length interrogation of a drawn curve.
pub trait CurveGeometry {
    /// Total arc length in pixels.
    fn total_length(&self) -> f64;

    /// Position at arc length `length`, clamped to `[0, total_length]`.
    fn point_at_length(&self, length: f64) -> Option<PixelPoint>;

    /// Number of path commands emitted for the curve, counting the initial
    /// move-to.
    fn segment_count(&self) -> usize;
}

/// One cubic Bezier piece; the start point is the previous piece's `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub control1: PixelPoint,
    pub control2: PixelPoint,
    pub to: PixelPoint,
}

impl CubicSegment {
    /// Degree-elevates a quadratic piece from `from` to `to`.
    #[must_use]
    pub fn from_quadratic(from: PixelPoint, control: PixelPoint, to: PixelPoint) -> Self {
        Self {
            control1: from.lerp(control, 2.0 / 3.0),
            control2: to.lerp(control, 2.0 / 3.0),
            to,
        }
    }

    #[must_use]
    pub fn eval(&self, from: PixelPoint, t: f64) -> PixelPoint {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        PixelPoint::new(
            a * from.x + b * self.control1.x + c * self.control2.x + d * self.to.x,
            a * from.y + b * self.control1.y + c * self.control2.y + d * self.to.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ArcLengthTable {
    vertices: Vec<PixelPoint>,
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    fn from_vertices(vertices: Vec<PixelPoint>) -> Self {
        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        for (idx, vertex) in vertices.iter().enumerate() {
            if idx > 0 {
                total += vertices[idx - 1].distance(*vertex);
            }
            cumulative.push(total);
        }
        Self {
            vertices,
            cumulative,
        }
    }

    fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, length: f64) -> Option<PixelPoint> {
        let first = *self.vertices.first()?;
        if !length.is_finite() || length <= 0.0 {
            return Some(first);
        }

        let idx = self.cumulative.partition_point(|cum| *cum < length);
        if idx >= self.vertices.len() {
            return self.vertices.last().copied();
        }
        if idx == 0 {
            return Some(first);
        }

        let start = self.cumulative[idx - 1];
        let span = self.cumulative[idx] - start;
        let t = if span > 0.0 {
            (length - start) / span
        } else {
            0.0
        };
        Some(self.vertices[idx - 1].lerp(self.vertices[idx], t))
    }
}

/// Straight segments between consecutive vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    table: ArcLengthTable,
}

impl Polyline {
    /// Builds a polyline; non-finite vertices are dropped.
    #[must_use]
    pub fn new(points: &[PixelPoint]) -> Self {
        let vertices = points.iter().copied().filter(|p| p.is_finite()).collect();
        Self {
            table: ArcLengthTable::from_vertices(vertices),
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[PixelPoint] {
        &self.table.vertices
    }
}

impl CurveGeometry for Polyline {
    fn total_length(&self) -> f64 {
        self.table.total()
    }

    fn point_at_length(&self, length: f64) -> Option<PixelPoint> {
        self.table.point_at(length)
    }

    fn segment_count(&self) -> usize {
        self.table.vertices.len()
    }
}

/// Cardinal spline through the vertices, expressed as cubic pieces.
///
/// The first and last pieces are quadratics (elevated to cubic) so the curve
/// leaves and enters its endpoints without an explicit end tangent. Fewer
/// than three vertices degrade to straight segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardinalCurve {
    start: Option<PixelPoint>,
    segments: Vec<CubicSegment>,
    table: ArcLengthTable,
}

impl CardinalCurve {
    #[must_use]
    pub fn new(points: &[PixelPoint]) -> Self {
        Self::with_tension(points, DEFAULT_CARDINAL_TENSION)
    }

    /// Builds the curve with an explicit tension; non-finite vertices are
    /// dropped.
    #[must_use]
    pub fn with_tension(points: &[PixelPoint], tension: f64) -> Self {
        let points: Vec<PixelPoint> = points.iter().copied().filter(|p| p.is_finite()).collect();
        let segments = cardinal_segments(&points, tension);
        let start = points.first().copied();
        let table = match start {
            Some(start) => ArcLengthTable::from_vertices(flatten(start, &segments)),
            None => ArcLengthTable::default(),
        };
        Self {
            start,
            segments,
            table,
        }
    }

    #[must_use]
    pub fn start(&self) -> Option<PixelPoint> {
        self.start
    }

    #[must_use]
    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }
}

impl CurveGeometry for CardinalCurve {
    fn total_length(&self) -> f64 {
        self.table.total()
    }

    fn point_at_length(&self, length: f64) -> Option<PixelPoint> {
        self.table.point_at(length)
    }

    fn segment_count(&self) -> usize {
        match self.start {
            Some(_) => self.segments.len() + 1,
            None => 0,
        }
    }
}

fn cardinal_segments(points: &[PixelPoint], tension: f64) -> Vec<CubicSegment> {
    let n = points.len();
    if n < 3 {
        return points
            .windows(2)
            .map(|pair| CubicSegment {
                control1: pair[0],
                control2: pair[1],
                to: pair[1],
            })
            .collect();
    }

    let a = (1.0 - tension) / 2.0;
    let tangents: Vec<PixelPoint> = points
        .windows(3)
        .map(|w| PixelPoint::new(a * (w[2].x - w[0].x), a * (w[2].y - w[0].y)))
        .collect();

    let mut segments = Vec::with_capacity(n - 1);
    let lead = PixelPoint::new(
        points[1].x - tangents[0].x * 2.0 / 3.0,
        points[1].y - tangents[0].y * 2.0 / 3.0,
    );
    segments.push(CubicSegment::from_quadratic(points[0], lead, points[1]));

    for k in 1..n - 2 {
        let (t0, t1) = (tangents[k - 1], tangents[k]);
        segments.push(CubicSegment {
            control1: PixelPoint::new(points[k].x + t0.x, points[k].y + t0.y),
            control2: PixelPoint::new(points[k + 1].x - t1.x, points[k + 1].y - t1.y),
            to: points[k + 1],
        });
    }

    let last_tangent = tangents[n - 3];
    let tail = PixelPoint::new(
        points[n - 2].x + last_tangent.x * 2.0 / 3.0,
        points[n - 2].y + last_tangent.y * 2.0 / 3.0,
    );
    segments.push(CubicSegment::from_quadratic(points[n - 2], tail, points[n - 1]));
    segments
}

fn flatten(start: PixelPoint, segments: &[CubicSegment]) -> Vec<PixelPoint> {
    let mut vertices = Vec::with_capacity(segments.len() * FLATTEN_STEPS + 1);
    vertices.push(start);
    let mut from = start;
    for segment in segments {
        for step in 1..=FLATTEN_STEPS {
            vertices.push(segment.eval(from, step as f64 / FLATTEN_STEPS as f64));
        }
        from = segment.to;
    }
    vertices
}
