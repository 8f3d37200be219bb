use crate::core::{Color, ScaleId, ScaleManager, format_integer_tick, format_tick};
use crate::core::scale_manager::GRID_TICKS;
use crate::render::{AxisScene, AxisTick, LinePrimitive, TextAnchor, TextPrimitive};

use super::LineChartConfig;

/// Axes narrower than this are built but not displayed.
pub const MIN_AXIS_DISPLAY_WIDTH_PX: f64 = 100.0;
/// Label padding when the axis doubles as a grid.
pub const GRID_TICK_PADDING_PX: f64 = 10.0;
pub const TICK_PADDING_PX: f64 = 3.0;
/// Offset of the x title below the plot.
pub const X_TITLE_OFFSET_PX: f64 = 40.0;
/// Offset of the rotated y title left of the plot.
pub const Y_TITLE_OFFSET_PX: f64 = -30.0;

const GRID_LINE_WIDTH_PX: f64 = 1.0;
const GRID_LINE_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

pub(super) struct AxisSceneBuilder;

impl AxisSceneBuilder {
    pub(super) fn x_axis(scales: &ScaleManager, config: &LineChartConfig) -> AxisScene {
        let plot = scales.plot();
        let count = if config.vertical_grid {
            GRID_TICKS
        } else {
            scales.x_tick_count()
        };
        let ticks: Vec<AxisTick> = scales
            .x()
            .ticks(count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scales.project(ScaleId::X, value),
                label: format_integer_tick(value),
            })
            .collect();

        let grid_lines = if config.vertical_grid {
            ticks
                .iter()
                .map(|tick| {
                    LinePrimitive::new(
                        tick.position,
                        0.0,
                        tick.position,
                        plot.height,
                        GRID_LINE_WIDTH_PX,
                        GRID_LINE_COLOR,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        AxisScene {
            visible: plot.width >= MIN_AXIS_DISPLAY_WIDTH_PX,
            ticks,
            tick_padding: padding(config.vertical_grid),
            grid_lines,
            title: TextPrimitive::new(
                config.x_axis_title.clone(),
                plot.width / 2.0,
                plot.height + X_TITLE_OFFSET_PX,
                TextAnchor::Middle,
            ),
        }
    }

    pub(super) fn y_axis(scales: &ScaleManager, config: &LineChartConfig) -> AxisScene {
        let plot = scales.plot();
        let count = if config.horizontal_grid {
            GRID_TICKS
        } else {
            scales.y_tick_count()
        };
        let y = scales.y();
        let step = y.tick_step(count).unwrap_or(1.0);
        let ticks: Vec<AxisTick> = y
            .ticks(count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scales.project(ScaleId::Y, value),
                label: Some(format_tick(value, step)),
            })
            .collect();

        let grid_lines = if config.horizontal_grid {
            ticks
                .iter()
                .map(|tick| {
                    LinePrimitive::new(
                        0.0,
                        tick.position,
                        plot.width,
                        tick.position,
                        GRID_LINE_WIDTH_PX,
                        GRID_LINE_COLOR,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        AxisScene {
            // Both axes follow the plot width.
            visible: plot.width >= MIN_AXIS_DISPLAY_WIDTH_PX,
            ticks,
            tick_padding: padding(config.horizontal_grid),
            grid_lines,
            title: TextPrimitive::new(
                config.y_axis_title.clone(),
                -(plot.height / 2.0),
                Y_TITLE_OFFSET_PX,
                TextAnchor::Middle,
            )
            .rotated(-90.0),
        }
    }
}

fn padding(grid: bool) -> f64 {
    if grid {
        GRID_TICK_PADDING_PX
    } else {
        TICK_PADDING_PX
    }
}

#[cfg(test)]
mod tests {
    use super::AxisSceneBuilder;
    use crate::api::LineChartConfig;
    use crate::core::{PlotSize, ScaleManager};

    fn scales(width: f64) -> ScaleManager {
        let mut scales = ScaleManager::new(PlotSize::new(width, 295.0), 0.0, 100.0);
        scales.set_domain((1.0, 3.0));
        scales
    }

    #[test]
    fn x_labels_are_integer_only() {
        let axis = AxisSceneBuilder::x_axis(&scales(730.0), &LineChartConfig::default());
        assert!(axis.visible);
        assert!(axis.grid_lines.is_empty());
        let labelled: Vec<_> = axis.ticks.iter().filter_map(|t| t.label.clone()).collect();
        assert_eq!(labelled, vec!["1", "2", "3"]);
        assert!(axis.ticks.len() > labelled.len());
    }

    #[test]
    fn x_tick_density_uses_fractional_count() {
        // 795 px asks for 15.9 ticks, which lands on a step of 5 rather than 10.
        let mut scales = ScaleManager::new(PlotSize::new(795.0, 295.0), 0.0, 100.0);
        scales.set_domain((0.0, 100.0));
        let axis = AxisSceneBuilder::x_axis(&scales, &LineChartConfig::default());
        assert_eq!(axis.ticks.len(), 21);
        assert_eq!(axis.ticks[1].label.as_deref(), Some("5"));
    }

    #[test]
    fn grids_add_ten_tick_lines_with_padding() {
        let config = LineChartConfig::default().with_grid(true, true);
        let scales = scales(730.0);
        let y = AxisSceneBuilder::y_axis(&scales, &config);
        assert_eq!(y.ticks.len(), 11);
        assert_eq!(y.grid_lines.len(), 11);
        assert_eq!(y.tick_padding, 10.0);
        assert_eq!(y.ticks[1].label.as_deref(), Some("10"));
        assert_eq!(y.grid_lines[0].x2, 730.0);
    }

    #[test]
    fn narrow_plot_hides_axes() {
        let scales = scales(80.0);
        let config = LineChartConfig::default();
        assert!(!AxisSceneBuilder::x_axis(&scales, &config).visible);
        assert!(!AxisSceneBuilder::y_axis(&scales, &config).visible);
    }

    #[test]
    fn titles_follow_plot_geometry() {
        let scales = scales(730.0);
        let config = LineChartConfig::default().with_axis_titles("day", "load");
        let x = AxisSceneBuilder::x_axis(&scales, &config);
        assert_eq!((x.title.x, x.title.y), (365.0, 335.0));
        let y = AxisSceneBuilder::y_axis(&scales, &config);
        assert_eq!((y.title.x, y.title.y), (-147.5, -30.0));
        assert_eq!(y.title.rotation_deg, -90.0);
    }
}
