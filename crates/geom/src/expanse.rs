use super::{Point, Rect};

/// An `Expanse` is a width and height with no location. Window surfaces and
/// negotiated widget sizes are expanses; placing one on screen makes a `Rect`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The number of cells covered.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// A `Rect` with these dimensions anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this expanse can hold `other` in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Shrink by a border of `border` cells on every side, saturating at zero.
    pub fn shrink(&self, border: u32) -> Self {
        Self {
            w: self.w.saturating_sub(border * 2),
            h: self.h.saturating_sub(border * 2),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
