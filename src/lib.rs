//! hoverline: line charts with nearest-point hover inspection.
//!
//! Series are projected through linear scales, sampled into hit-test seeds
//! (straight or arc-length along a smoothed curve), and the plot is
//! partitioned into Voronoi cells around those seeds. Hovering a cell
//! highlights its sample and places a tooltip that stays aligned with the
//! drawing as the container is resized.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod overlay;
pub mod render;
pub mod telemetry;

pub use api::{HeadlessHost, LineChart, LineChartConfig, SeriesSpec};
pub use error::{ChartError, ChartResult};
