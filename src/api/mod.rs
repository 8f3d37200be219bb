mod axis_scene_builder;
mod chart_config;
mod draw_coordinator;
mod headless_host;
mod host;
mod hover_coordinator;
mod line_chart;
mod resize_controller;
mod series;

pub use axis_scene_builder::{
    GRID_TICK_PADDING_PX, MIN_AXIS_DISPLAY_WIDTH_PX, TICK_PADDING_PX, X_TITLE_OFFSET_PX,
    Y_TITLE_OFFSET_PX,
};
pub use chart_config::{LineChartConfig, MarginSpec};
pub use draw_coordinator::{
    HIT_REGION_FILL, HIT_REGION_OPACITY, HIT_REGION_STROKE, HIT_REGION_STROKE_WIDTH_PX,
};
pub use headless_host::{HeadlessHost, HeadlessOverlay};
pub use host::{ContainerHost, ListenerId};
pub use line_chart::LineChart;
pub use series::SeriesSpec;

pub use crate::render::LegendPlacement;
