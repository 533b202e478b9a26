pub mod gesture;
pub mod viewport;

pub use gesture::ViewportController;
pub use viewport::{Point, Rect, Viewport};
