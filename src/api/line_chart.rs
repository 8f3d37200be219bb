use tracing::debug;

use crate::core::{DataRow, Margin, PlotSize, SamplePoint, ScaleManager, SpatialIndex};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::overlay::{ResizeCoordinator, TooltipPlacer};
use crate::render::{ChartScene, Renderer};

use super::{ContainerHost, LineChartConfig, ListenerId};

/// Main facade consumed by host applications.
///
/// `LineChart` owns the scales, the hit-test samples and their tessellation,
/// the hover state and the tooltip, and pushes scenes to the renderer.
pub struct LineChart<R: Renderer, H: ContainerHost> {
    pub(super) renderer: R,
    pub(super) host: H,
    pub(super) config: LineChartConfig,
    pub(super) container: String,
    pub(super) margin: Margin,
    pub(super) scales: ScaleManager,
    pub(super) resize: ResizeCoordinator,
    pub(super) rows: Vec<DataRow>,
    pub(super) samples: Vec<SamplePoint>,
    pub(super) index: SpatialIndex,
    pub(super) interaction: InteractionState,
    pub(super) tooltip: TooltipPlacer,
    pub(super) scene: Option<ChartScene>,
    pub(super) resize_listener: Option<ListenerId>,
}

impl<R: Renderer, H: ContainerHost> LineChart<R, H> {
    /// Validates `config`, measures the container, derives the plot size and
    /// subscribes to the host's resize signal.
    pub fn new(renderer: R, mut host: H, config: LineChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let container = config
            .container
            .clone()
            .ok_or(ChartError::MissingContainer)?;
        let container_width = host
            .container_width(&container)
            .ok_or(ChartError::MissingContainer)?;
        if !container_width.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "container `{container}` reports a non-finite width"
            )));
        }

        let margin = config.resolved_margin()?;
        let plot_width = container_width - margin.horizontal();
        let plot_height = config.height_rule()?.plot_height(plot_width, margin);
        let plot = PlotSize::new(plot_width, plot_height);

        let scales = ScaleManager::new(plot, config.min_y, config.max_y);
        let resize = ResizeCoordinator::new(container_width, margin);
        let resize_listener = Some(host.subscribe_resize());
        debug!(
            container = container.as_str(),
            plot_width, plot_height, "line chart created"
        );

        Ok(Self {
            renderer,
            host,
            config,
            container,
            margin,
            scales,
            resize,
            rows: Vec::new(),
            samples: Vec::new(),
            index: SpatialIndex::default(),
            interaction: InteractionState::default(),
            tooltip: TooltipPlacer::new(),
            scene: None,
            resize_listener,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn plot(&self) -> PlotSize {
        self.scales.plot()
    }

    /// Width and height of the scalable drawing surface.
    #[must_use]
    pub fn view_box(&self) -> PlotSize {
        let plot = self.plot();
        PlotSize::new(
            plot.width + self.margin.horizontal(),
            plot.height + self.margin.vertical(),
        )
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleManager {
        &self.scales
    }

    #[must_use]
    pub fn resize(&self) -> &ResizeCoordinator {
        &self.resize
    }

    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Hit-test samples of the last line pass, across all series.
    #[must_use]
    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    #[must_use]
    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replaces the data set and refits the x domain to its extent.
    ///
    /// Existing paths and tessellation stay until the next `draw_lines`.
    pub fn attach_data(&mut self, rows: Vec<DataRow>) {
        let extent = self.scales.fit_x_domain(&rows, &self.config.x_key);
        debug!(rows = rows.len(), ?extent, "data attached");
        self.rows = rows;
    }
}
