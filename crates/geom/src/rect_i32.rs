use super::{Expanse, PointI32, Rect};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct RectI32 {
    /// Top-left corner.
    pub tl: PointI32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

/// Clamp a 64-bit coordinate into the signed 32-bit range.
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl RectI32 {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: PointI32 { x, y },
            w,
            h,
        }
    }

    /// Place an expanse at a signed origin.
    pub fn at(tl: PointI32, e: Expanse) -> Self {
        Self {
            tl,
            w: e.w,
            h: e.h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The dimensions of this rect.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Intersect this signed rect with an unsigned rect in the same coordinate space.
    pub fn intersect_rect(&self, other: Rect) -> Option<Rect> {
        let right = clamp_i32(i64::from(self.tl.x) + i64::from(self.w));
        let bottom = clamp_i32(i64::from(self.tl.y) + i64::from(self.h));

        let other_left = clamp_i32(i64::from(other.tl.x));
        let other_top = clamp_i32(i64::from(other.tl.y));
        let other_right = clamp_i32(i64::from(other.tl.x) + i64::from(other.w));
        let other_bottom = clamp_i32(i64::from(other.tl.y) + i64::from(other.h));

        let inter_left = self.tl.x.max(other_left);
        let inter_top = self.tl.y.max(other_top);
        let inter_right = right.min(other_right);
        let inter_bottom = bottom.min(other_bottom);

        if inter_right <= inter_left || inter_bottom <= inter_top {
            return None;
        }

        Some(Rect::new(
            inter_left as u32,
            inter_top as u32,
            (inter_right - inter_left) as u32,
            (inter_bottom - inter_top) as u32,
        ))
    }
}

impl From<Rect> for RectI32 {
    fn from(r: Rect) -> Self {
        Self {
            tl: r.tl.into(),
            w: r.w,
            h: r.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_against_screen() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(
            RectI32::new(-5, -2, 10, 4).intersect_rect(screen),
            Some(Rect::new(0, 0, 5, 2))
        );
        assert_eq!(
            RectI32::new(75, 20, 10, 10).intersect_rect(screen),
            Some(Rect::new(75, 20, 5, 4))
        );
        assert_eq!(RectI32::new(-10, 0, 10, 4).intersect_rect(screen), None);
        assert_eq!(RectI32::new(90, 0, 10, 4).intersect_rect(screen), None);
    }
}
