//! Cell-grid geometry primitives shared by the trellis toolkit.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Border decomposition of a rectangle.
mod frame;
/// Horizontal line helpers.
mod line;
/// Point helpers.
mod point;
/// Signed points.
mod point_i32;
/// Rectangle operations.
mod rect;
/// Rectangles with a signed origin.
mod rect_i32;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use frame::Frame;
pub use line::Line;
pub use point::Point;
pub use point_i32::PointI32;
pub use rect::Rect;
pub use rect_i32::RectI32;

/// Cardinal directions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// Upward direction.
    Up,
    /// Downward direction.
    Down,
    /// Leftward direction.
    Left,
    /// Rightward direction.
    Right,
}

impl Direction {
    /// Is this a vertical direction?
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}
