use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("missing container")]
    MissingContainer,

    #[error("missing {side} in margin")]
    MissingMargin { side: &'static str },

    #[error("no height (percent) or aspect ratio defined")]
    MissingHeight,

    #[error("missing y_key in series definition #{index}")]
    MissingSeriesKey { index: usize },

    #[error("chart structure has not been drawn; call draw_chart first")]
    ChartNotDrawn,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
