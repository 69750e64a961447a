use super::{Point, Rect};

/// A horizontal run of cells, one row high.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Line {
    /// Leftmost cell.
    pub tl: Point,
    /// Width in cells.
    pub w: u32,
}

impl Line {
    /// Construct a line.
    pub fn new(x: u32, y: u32, w: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
        }
    }

    /// The row `y` of a rect, relative to the rect's origin. Rows beyond the
    /// rect yield `None`.
    pub fn row_of(rect: Rect, y: u32) -> Option<Self> {
        (y < rect.h).then(|| Self::new(rect.tl.x, rect.tl.y + y, rect.w))
    }

    /// This line as a one-row rect.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: self.tl,
            w: self.w,
            h: 1,
        }
    }
}
