use hoverline::core::{Margin, PlotSize, ScaleId, ScaleManager};
use hoverline::overlay::ResizeCoordinator;
use proptest::prelude::*;

proptest! {
    #[test]
    fn x_scale_round_trip_property(
        x_start in -10_000.0f64..10_000.0,
        x_span in 1.0f64..1_000_000.0,
        width in 1.0f64..4_000.0,
        pixel_factor in 0.0f64..1.0
    ) {
        let mut scales = ScaleManager::new(PlotSize::new(width, 300.0), 0.0, 100.0);
        scales.set_domain((x_start, x_start + x_span));

        let pixel = pixel_factor * width;
        let recovered = scales.project(ScaleId::X, scales.invert(ScaleId::X, pixel));
        prop_assert!((recovered - pixel).abs() <= 1e-6);
    }

    #[test]
    fn y_scale_round_trip_property(
        max_y in 0.001f64..1_000_000.0,
        height in 1.0f64..4_000.0,
        pixel_factor in 0.0f64..1.0
    ) {
        let scales = ScaleManager::new(PlotSize::new(500.0, height), 0.0, max_y);
        let pixel = pixel_factor * height;
        let recovered = scales.project(ScaleId::Y, scales.invert(ScaleId::Y, pixel));
        prop_assert!((recovered - pixel).abs() <= 1e-6);
    }

    #[test]
    fn resize_preserves_domains_property(
        width in 1.0f64..4_000.0,
        height in 1.0f64..4_000.0,
        new_width in 1.0f64..4_000.0,
        new_height in 1.0f64..4_000.0
    ) {
        let mut scales = ScaleManager::new(PlotSize::new(width, height), 0.0, 100.0);
        scales.set_domain((3.0, 17.0));
        let x_domain = scales.x().domain();
        let y_domain = scales.y().domain();

        scales.resize(PlotSize::new(new_width, new_height));
        prop_assert_eq!(scales.x().domain(), x_domain);
        prop_assert_eq!(scales.y().domain(), y_domain);
        prop_assert_eq!(scales.x().range(), (0.0, new_width));
        prop_assert_eq!(scales.y().range(), (new_height, 0.0));
    }

    #[test]
    fn tick_counts_never_drop_below_two(
        width in -500.0f64..4_000.0,
        height in -500.0f64..4_000.0
    ) {
        let scales = ScaleManager::new(PlotSize::new(width, height), 0.0, 100.0);
        prop_assert!(scales.x_tick_count() >= 2.0);
        prop_assert!(scales.y_tick_count() >= 2.0);
    }

    #[test]
    fn scaled_margin_tracks_every_observation(
        original in 1.0f64..4_000.0,
        left in 0.0f64..200.0,
        widths in prop::collection::vec(1.0f64..4_000.0, 1..16)
    ) {
        let margin = Margin::new(10.0, 20.0, 60.0, left);
        let mut resize = ResizeCoordinator::new(original, margin);
        for width in widths {
            resize.observe(width);
            let expected = left * (width / original);
            let drift = (resize.scaled_margin().left - expected).abs();
            prop_assert!(drift <= 1e-9 * expected.max(1.0));
        }
    }
}
