use serde::{Deserialize, Serialize};

use crate::core::Margin;
use crate::error::{ChartError, ChartResult};
use crate::render::LegendPlacement;

/// Margin as supplied by the caller; every side is required once the object
/// is present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginSpec {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginSpec {
    /// Resolves to a full margin or names the first missing side, checked
    /// top, bottom, left, right.
    pub fn resolve(self) -> ChartResult<Margin> {
        let side = |value: Option<f64>, side: &'static str| {
            value.ok_or(ChartError::MissingMargin { side })
        };
        let top = side(self.top, "top")?;
        let bottom = side(self.bottom, "bottom")?;
        let left = side(self.left, "left")?;
        let right = side(self.right, "right")?;
        Ok(Margin::new(top, right, bottom, left))
    }
}

impl From<Margin> for MarginSpec {
    fn from(margin: Margin) -> Self {
        Self {
            top: Some(margin.top),
            right: Some(margin.right),
            bottom: Some(margin.bottom),
            left: Some(margin.left),
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can load chart setup from JSON. Exactly one of
/// `height_percent` and `aspect_ratio` must be set; when both are present
/// `height_percent` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    /// Host element identifier.
    pub container: Option<String>,
    pub margin: Option<MarginSpec>,
    pub legend: Option<LegendPlacement>,
    pub interpolate: bool,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub horizontal_grid: bool,
    pub vertical_grid: bool,
    /// Accepted but not applied to the y domain.
    pub min_y: f64,
    pub max_y: f64,
    pub x_key: String,
    pub height_percent: Option<f64>,
    pub aspect_ratio: Option<f64>,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            container: None,
            margin: None,
            legend: None,
            interpolate: false,
            x_axis_title: "x".to_owned(),
            y_axis_title: "y".to_owned(),
            horizontal_grid: false,
            vertical_grid: false,
            min_y: 0.0,
            max_y: 100.0,
            x_key: "x".to_owned(),
            height_percent: None,
            aspect_ratio: None,
        }
    }
}

/// How the plot height is derived from the plot width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HeightRule {
    Percent(f64),
    AspectRatio(f64),
}

impl LineChartConfig {
    #[must_use]
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin.into());
        self
    }

    #[must_use]
    pub fn with_height_percent(mut self, percent: f64) -> Self {
        self.height_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, placement: LegendPlacement) -> Self {
        self.legend = Some(placement);
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_title = x.into();
        self.y_axis_title = y.into();
        self
    }

    #[must_use]
    pub fn with_grid(mut self, horizontal: bool, vertical: bool) -> Self {
        self.horizontal_grid = horizontal;
        self.vertical_grid = vertical;
        self
    }

    #[must_use]
    pub fn with_y_bounds(mut self, min_y: f64, max_y: f64) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    #[must_use]
    pub fn with_x_key(mut self, x_key: impl Into<String>) -> Self {
        self.x_key = x_key.into();
        self
    }

    /// Margin in effect: the configured one, or the default when absent.
    pub fn resolved_margin(&self) -> ChartResult<Margin> {
        let margin = match self.margin {
            Some(spec) => spec.resolve()?,
            None => Margin::default(),
        };
        if !margin.is_finite() {
            return Err(ChartError::InvalidConfig(
                "margin sides must be finite".to_owned(),
            ));
        }
        Ok(margin)
    }

    pub(crate) fn height_rule(&self) -> ChartResult<HeightRule> {
        match (self.height_percent, self.aspect_ratio) {
            (Some(percent), _) => {
                if !percent.is_finite() {
                    return Err(ChartError::InvalidConfig(
                        "height_percent must be finite".to_owned(),
                    ));
                }
                Ok(HeightRule::Percent(percent.trunc()))
            }
            (None, Some(ratio)) => {
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(ChartError::InvalidConfig(
                        "aspect_ratio must be finite and > 0".to_owned(),
                    ));
                }
                Ok(HeightRule::AspectRatio(ratio))
            }
            (None, None) => Err(ChartError::MissingHeight),
        }
    }

    /// Checks everything construction needs, in the order a caller would fix
    /// it: container, margin, height rule, y bounds.
    pub fn validate(&self) -> ChartResult<()> {
        match self.container.as_deref() {
            Some(id) if !id.is_empty() => {}
            _ => return Err(ChartError::MissingContainer),
        }
        self.resolved_margin()?;
        self.height_rule()?;
        if !self.max_y.is_finite() || !self.min_y.is_finite() {
            return Err(ChartError::InvalidConfig(
                "min_y and max_y must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

impl HeightRule {
    /// Plot height for `plot_width`, floored at `vertical margin + 20`.
    pub(crate) fn plot_height(self, plot_width: f64, margin: Margin) -> f64 {
        let naive = match self {
            Self::Percent(percent) => plot_width / 100.0 * percent,
            Self::AspectRatio(ratio) => plot_width / ratio,
        } - margin.vertical();
        let floor = margin.vertical() + MIN_PLOT_HEIGHT_SLACK_PX;
        if naive < floor {
            floor
        } else {
            naive
        }
    }
}

const MIN_PLOT_HEIGHT_SLACK_PX: f64 = 20.0;
