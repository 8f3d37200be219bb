use std::cell::RefCell;
use std::rc::Rc;

use hoverline::api::{
    ContainerHost, HeadlessHost, LineChart, LineChartConfig, ListenerId, SeriesSpec,
};
use hoverline::core::{Color, DataRow, Margin};
use hoverline::overlay::{
    OverlayId, OverlayPosition, OverlaySize, OverlaySurface, TooltipContent, ViewportMetrics,
};
use hoverline::render::NullRenderer;

const VIEWPORT: ViewportMetrics = ViewportMetrics {
    width: 1024.0,
    height: 768.0,
    scroll_top: 0.0,
};

fn config() -> LineChartConfig {
    LineChartConfig::new("chart")
        .with_margin(Margin::new(10.0, 20.0, 60.0, 50.0))
        .with_height_percent(50.0)
}

fn drawn_chart() -> LineChart<NullRenderer, HeadlessHost> {
    let host = HeadlessHost::new(VIEWPORT).with_container("chart", 800.0);
    let mut chart = LineChart::new(NullRenderer::default(), host, config()).expect("chart init");
    chart.attach_data(vec![
        DataRow::new().with("x", 1.0).with("y", 10.0),
        DataRow::new().with("x", 2.0).with("y", 20.0),
        DataRow::new().with("x", 3.0).with("y", 15.0),
    ]);
    chart.draw_chart().expect("draw chart");
    chart.draw_lines(&[SeriesSpec::new("y")]).expect("draw lines");
    chart
}

#[test]
fn resize_scales_tooltip_but_keeps_tessellation() {
    let mut chart = drawn_chart();
    let cells_before = chart.spatial_index().clone();

    chart.host_mut().set_container_width("chart", 400.0);
    assert_eq!(chart.on_resize(400.0), 0.5);
    assert_eq!(chart.resize().scaled_margin(), Margin::new(5.0, 10.0, 30.0, 25.0));
    assert_eq!(chart.spatial_index(), &cells_before);
    assert_eq!(chart.plot().width, 730.0);

    let position = chart
        .pointer_enter_cell(1)
        .expect("enter")
        .expect("sample exists");
    assert_eq!(position.left, (365.0 - 50.0 + 25.0) * 0.5);
    assert_eq!(position.top, (236.0 - 40.0 - 20.0) * 0.5);
}

#[test]
fn tooltip_rereads_width_missed_by_resize_signal() {
    let mut chart = drawn_chart();
    chart.host_mut().set_container_width("chart", 1600.0);
    chart.pointer_enter_cell(1).expect("enter");
    assert_eq!(chart.resize().scale_factor(), 2.0);
    assert_eq!(chart.resize().scaled_margin().left, 100.0);
}

#[test]
fn teardown_releases_subscription() {
    let mut chart = drawn_chart();
    assert!(chart.is_subscribed());
    assert_eq!(chart.host().active_listeners(), 1);

    chart.pointer_enter_cell(0).expect("enter");
    chart.teardown();
    assert!(!chart.is_subscribed());
    assert_eq!(chart.host().active_listeners(), 0);
    assert!(chart.host().overlays().is_empty());

    chart.teardown();
    assert_eq!(chart.host().active_listeners(), 0);
}

/// Host whose listener registry outlives the chart.
#[derive(Clone, Default)]
struct SharedHost {
    listeners: Rc<RefCell<Vec<ListenerId>>>,
    overlays: Rc<RefCell<Vec<OverlayId>>>,
}

impl OverlaySurface for SharedHost {
    fn create_overlay(
        &mut self,
        _content: &TooltipContent,
        _position: OverlayPosition,
    ) -> OverlayId {
        let mut overlays = self.overlays.borrow_mut();
        let id = OverlayId(overlays.len() as u64 + 1);
        overlays.push(id);
        id
    }

    fn measure_overlay(&self, _id: OverlayId) -> OverlaySize {
        OverlaySize {
            width: 80.0,
            height: 30.0,
        }
    }

    fn place_overlay(&mut self, _id: OverlayId, _position: OverlayPosition) {}

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.borrow_mut().retain(|existing| *existing != id);
    }

    fn viewport(&self) -> ViewportMetrics {
        VIEWPORT
    }
}

impl ContainerHost for SharedHost {
    fn container_width(&self, container: &str) -> Option<f64> {
        (container == "chart").then_some(640.0)
    }

    fn stroke_for_class(&self, _class_name: &str) -> Option<Color> {
        None
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = ListenerId(listeners.len() as u64 + 1);
        listeners.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, listener: ListenerId) {
        self.listeners.borrow_mut().retain(|id| *id != listener);
    }
}

#[test]
fn dropping_the_chart_unsubscribes_and_removes_tooltip() {
    let host = SharedHost::default();
    let listeners = Rc::clone(&host.listeners);
    let overlays = Rc::clone(&host.overlays);
    {
        let mut chart =
            LineChart::new(NullRenderer::default(), host, config()).expect("chart init");
        chart.attach_data(vec![
            DataRow::new().with("x", 0.0).with("y", 50.0),
            DataRow::new().with("x", 1.0).with("y", 60.0),
        ]);
        chart.draw_chart().expect("draw chart");
        chart.draw_lines(&[SeriesSpec::new("y")]).expect("draw lines");
        chart.pointer_enter_cell(0).expect("enter");
        assert_eq!(listeners.borrow().len(), 1);
        assert_eq!(overlays.borrow().len(), 1);
    }
    assert!(listeners.borrow().is_empty());
    assert!(overlays.borrow().is_empty());
}

#[test]
fn two_charts_own_their_tooltips() {
    let host = SharedHost::default();
    let overlays = Rc::clone(&host.overlays);
    let data = vec![
        DataRow::new().with("x", 0.0).with("y", 50.0),
        DataRow::new().with("x", 1.0).with("y", 60.0),
    ];

    let mut first =
        LineChart::new(NullRenderer::default(), host.clone(), config()).expect("first");
    let mut second = LineChart::new(NullRenderer::default(), host, config()).expect("second");
    for chart in [&mut first, &mut second] {
        chart.attach_data(data.clone());
        chart.draw_chart().expect("draw chart");
        chart.draw_lines(&[SeriesSpec::new("y")]).expect("draw lines");
    }

    first.pointer_enter_cell(0).expect("first enter");
    second.pointer_enter_cell(1).expect("second enter");
    assert_eq!(overlays.borrow().len(), 2);

    first.pointer_leave_cell(0).expect("first leave");
    assert_eq!(overlays.borrow().as_slice(), &[OverlayId(2)]);
}
