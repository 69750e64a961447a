use super::{Expanse, Frame, Point};
use crate::{Error, Result};

/// An unsigned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner
    pub tl: Point,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// The empty rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect cover no cells?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The dimensions of this rect.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.tl.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.tl.y + self.h
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose the other? An empty rect is
    /// enclosed if its origin lies within our bounds.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The overlap of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.tl.x.max(other.tl.x);
        let y = self.tl.y.max(other.tl.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r <= x || b <= y {
            None
        } else {
            Some(Self::new(x, y, r - x, b - y))
        }
    }

    /// Given a point that falls within this rectangle, rebase the point to be
    /// relative to our origin. If the point falls outside the rect, an error is
    /// returned.
    pub fn rebase(&self, pt: Point) -> Result<Point> {
        if !self.contains_point(pt) {
            return Err(Error::Geometry(format!(
                "point {},{} outside rectangle",
                pt.x, pt.y
            )));
        }
        Ok(Point {
            x: pt.x - self.tl.x,
            y: pt.y - self.tl.y,
        })
    }

    /// Shift the origin by an offset, saturating at zero.
    pub fn scroll(&self, x: i32, y: i32) -> Self {
        Self {
            tl: self.tl.scroll(x, y),
            w: self.w,
            h: self.h,
        }
    }

    /// The interior left after removing `border` cells from each side. A rect
    /// too small to hold the border yields an empty rect at the inner origin.
    pub fn inner(&self, border: u32) -> Self {
        let e = self.expanse().shrink(border);
        Self::new(self.tl.x + border, self.tl.y + border, e.w, e.h)
    }

    /// Decompose this rect into a border frame.
    pub fn frame(&self, border: u32) -> Frame {
        Frame::new(*self, border)
    }

    /// Treating `self` as a viewport (origin = scroll offset, size = visible
    /// area), return the smallest shift of the viewport that brings `p` into
    /// view. An empty viewport snaps to the origin on the empty axis.
    pub fn scroll_to_contain(&self, p: Point) -> Self {
        let axis = |off: u32, size: u32, v: u32| {
            if size == 0 {
                0
            } else if v < off {
                v
            } else if v >= off + size {
                v + 1 - size
            } else {
                off
            }
        };
        Self::new(
            axis(self.tl.x, self.w, p.x),
            axis(self.tl.y, self.h, p.y),
            self.w,
            self.h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(5, 5, 10, 10)), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 3, 3)), None);
        assert_eq!(a.intersect(&Rect::new(2, 2, 0, 3)), None);
    }

    #[test]
    fn rebase() -> Result<()> {
        let r = Rect::new(5, 5, 10, 10);
        assert_eq!(r.rebase(Point { x: 6, y: 7 })?, Point { x: 1, y: 2 });
        assert!(r.rebase(Point { x: 1, y: 7 }).is_err());
        Ok(())
    }

    #[test]
    fn contains() {
        let r = Rect::new(5, 5, 10, 10);
        assert!(r.contains_rect(&Rect::new(5, 5, 10, 10)));
        assert!(!r.contains_rect(&Rect::new(5, 5, 11, 10)));
        assert!(r.contains_point(Point { x: 14, y: 14 }));
        assert!(!r.contains_point(Point { x: 15, y: 14 }));
    }

    #[test]
    fn inner() {
        assert_eq!(Rect::new(0, 0, 10, 5).inner(1), Rect::new(1, 1, 8, 3));
        assert!(Rect::new(0, 0, 1, 5).inner(1).is_zero());
    }

    #[test]
    fn scroll_to_contain() {
        let v = Rect::new(0, 0, 10, 5);
        assert_eq!(v.scroll_to_contain(Point { x: 3, y: 3 }), v);
        assert_eq!(
            v.scroll_to_contain(Point { x: 3, y: 7 }),
            Rect::new(0, 3, 10, 5)
        );
        let v = Rect::new(0, 8, 10, 5);
        assert_eq!(
            v.scroll_to_contain(Point { x: 0, y: 2 }),
            Rect::new(0, 2, 10, 5)
        );
        assert_eq!(
            Rect::new(4, 4, 0, 0).scroll_to_contain(Point { x: 9, y: 9 }),
            Rect::zero()
        );
    }
}
