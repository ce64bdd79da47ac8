pub mod count;
pub mod result;
pub mod start;

use crate::components::Component;

/// Trait for full screen views
pub trait ScreenView: Component {
    /// Get the screen title
    fn title(&self) -> &str;
}
