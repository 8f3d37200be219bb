pub mod color;
pub mod curve;
pub mod data;
pub mod sampler;
pub mod scale;
pub mod scale_manager;
pub mod types;
pub mod voronoi;

pub use color::Color;
pub use curve::{CardinalCurve, CubicSegment, CurveGeometry, DEFAULT_CARDINAL_TENSION, Polyline};
pub use data::{DataRow, rows_from_json_str};
pub use sampler::{
    PathSampler, SamplePoint, SamplingMode, SeriesTag, sampling_step, walk_arc_length,
};
pub use scale::{LinearScale, format_integer_tick, format_tick};
pub use scale_manager::{ScaleId, ScaleManager};
pub use types::{Margin, PixelPoint, PlotSize};
pub use voronoi::{SpatialIndex, VoronoiCell};
