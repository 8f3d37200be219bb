use serde::{Deserialize, Serialize};

/// One line to draw.
///
/// `y_key` is optional in the serialized form so a descriptor without it can
/// be loaded and rejected at draw time rather than at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(default)]
    pub y_key: Option<String>,
    /// Styling hook, also used to look up the stroke for tooltips.
    #[serde(default)]
    pub class_name: Option<String>,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(y_key: impl Into<String>) -> Self {
        Self {
            y_key: Some(y_key.into()),
            class_name: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}
