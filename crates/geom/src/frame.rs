use super::{Point, Rect};

/// The border ring of a rectangle, split into edges and corners. Window
/// borders are drawn by filling each part with the matching line glyph.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Frame {
    /// Top edge, not including corners
    pub top: Rect,
    /// Bottom edge, not including corners
    pub bottom: Rect,
    /// Left edge, not including corners
    pub left: Rect,
    /// Right edge, not including corners
    pub right: Rect,
    /// Top-left corner
    pub topleft: Rect,
    /// Top-right corner
    pub topright: Rect,
    /// Bottom-left corner
    pub bottomleft: Rect,
    /// Bottom-right corner
    pub bottomright: Rect,
    /// The rect the frame was cut from
    outer: Rect,
    /// Border thickness
    border: u32,
}

impl Frame {
    /// Cut a frame of thickness `border` from `rect`. If the rect cannot hold
    /// two borders in both dimensions, every part is empty.
    pub fn new(rect: Rect, border: u32) -> Self {
        let mut f = Self {
            outer: rect,
            border,
            ..Default::default()
        };
        if rect.w <= border * 2 || rect.h <= border * 2 {
            return f;
        }
        let (x, y, r, b) = (
            rect.tl.x,
            rect.tl.y,
            rect.right() - border,
            rect.bottom() - border,
        );
        let iw = rect.w - 2 * border;
        let ih = rect.h - 2 * border;
        f.top = Rect::new(x + border, y, iw, border);
        f.bottom = Rect::new(x + border, b, iw, border);
        f.left = Rect::new(x, y + border, border, ih);
        f.right = Rect::new(r, y + border, border, ih);
        f.topleft = Rect::new(x, y, border, border);
        f.topright = Rect::new(r, y, border, border);
        f.bottomleft = Rect::new(x, b, border, border);
        f.bottomright = Rect::new(r, b, border, border);
        f
    }

    /// The space inside the frame.
    pub fn inner(&self) -> Rect {
        if self.top.is_zero() {
            Rect::new(
                self.outer.tl.x + self.border,
                self.outer.tl.y + self.border,
                0,
                0,
            )
        } else {
            self.outer.inner(self.border)
        }
    }

    /// The rect passed to `Frame::new`.
    pub fn outer(&self) -> Rect {
        self.outer
    }

    /// The four corner cells of a single-width frame, clockwise from the top
    /// left.
    pub fn corner_points(&self) -> [Point; 4] {
        [
            self.topleft.tl,
            self.topright.tl,
            self.bottomright.tl,
            self.bottomleft.tl,
        ]
    }
}
