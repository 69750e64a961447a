use std::ops::Add;

use super::Rect;

/// An unsigned cell coordinate.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Point {
    /// The origin.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Shift the point by an offset, avoiding under- or overflow.
    pub fn scroll(&self, x: i32, y: i32) -> Self {
        let shift = |v: u32, d: i32| {
            if d < 0 {
                v.saturating_sub(d.unsigned_abs())
            } else {
                v.saturating_add(d.unsigned_abs())
            }
        };
        (shift(self.x, x), shift(self.y, y)).into()
    }

    /// Clamp a point so that it falls within `rect`. An empty rect clamps to
    /// its origin.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self
                .x
                .clamp(rect.tl.x, rect.tl.x + rect.w.saturating_sub(1)),
            y: self
                .y
                .clamp(rect.tl.y, rect.tl.y + rect.h.saturating_sub(1)),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl From<(u32, u32)> for Point {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}
