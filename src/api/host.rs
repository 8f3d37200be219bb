use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::overlay::OverlaySurface;

/// Handle for one registration on the host's resize signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Everything the chart needs from the environment it is embedded in.
///
/// The chart never queries global state: container measurement, stroke
/// lookup and the resize subscription all go through this trait, and the
/// tooltip overlay through [`OverlaySurface`].
pub trait ContainerHost: OverlaySurface {
    /// Current width of the container element, `None` if it does not exist.
    fn container_width(&self, container: &str) -> Option<f64>;

    /// Stroke color the host's styling assigns to `class_name`.
    fn stroke_for_class(&self, class_name: &str) -> Option<Color>;

    fn subscribe_resize(&mut self) -> ListenerId;

    fn unsubscribe_resize(&mut self, listener: ListenerId);
}
