//! Size requests and the negotiation rules that turn them into real extents.

use serde::{Deserialize, Serialize};

use crate::geom::{Expanse, Point, PointI32, Rect};

/// One requested dimension: a fixed number of cells, or `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Extent {
    /// A fixed cell count.
    Cells(u32),
    /// As much as the content wants, or else as much as is available.
    #[default]
    Auto,
}

impl Extent {
    /// The fixed cell count, if any.
    pub fn cells(self) -> Option<u32> {
        match self {
            Self::Cells(n) => Some(n),
            Self::Auto => None,
        }
    }

    /// Is this the `Auto` sentinel?
    pub fn is_auto(self) -> bool {
        self == Self::Auto
    }

    /// Fall back to `other` if this extent is `Auto`.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Auto => other,
            cells => cells,
        }
    }

    /// Resolve against an available length: fixed counts are clamped to it,
    /// `Auto` takes all of it.
    pub fn resolve(self, available: u32) -> u32 {
        match self {
            Self::Cells(n) => n.min(available),
            Self::Auto => available,
        }
    }
}

impl From<u32> for Extent {
    fn from(n: u32) -> Self {
        Self::Cells(n)
    }
}

/// A requested width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeRequest {
    /// Requested width.
    pub w: Extent,
    /// Requested height.
    pub h: Extent,
}

impl SizeRequest {
    /// Both dimensions `Auto`.
    pub const AUTO: Self = Self {
        w: Extent::Auto,
        h: Extent::Auto,
    };

    /// Construct a request from two extents.
    pub fn new(w: impl Into<Extent>, h: impl Into<Extent>) -> Self {
        Self {
            w: w.into(),
            h: h.into(),
        }
    }

    /// A fixed request.
    pub fn fixed(w: u32, h: u32) -> Self {
        Self::new(w, h)
    }

    /// Fill `Auto` dimensions from `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            w: self.w.or(other.w),
            h: self.h.or(other.h),
        }
    }

    /// Negotiate a real size inside `available` cells.
    ///
    /// `Auto` dimensions take the widget's wish size, and if that is also
    /// `Auto`, everything on offer. Fixed sizes are clamped to the offer. A
    /// result with a zero dimension collapses to zero in both.
    pub fn negotiate(&self, wish: Self, available: Expanse) -> Expanse {
        let req = self.or(wish);
        collapse(Expanse::new(
            req.w.resolve(available.w),
            req.h.resolve(available.h),
        ))
    }
}

/// Collapse an extent with a zero dimension to zero.
fn collapse(e: Expanse) -> Expanse {
    if e.is_empty() {
        Expanse::default()
    } else {
        e
    }
}

/// Negotiate the extent of a top-level window at `pos` on a screen of size
/// `screen`. `Auto` resolves as in [`SizeRequest::negotiate`], with the space
/// from the window's origin to the screen edge standing in for the parent's
/// offer. Fixed sizes are kept even if they run off screen; the compositor
/// clips them.
pub fn negotiate_window(
    pos: PointI32,
    request: SizeRequest,
    wish: SizeRequest,
    screen: Expanse,
) -> Expanse {
    let remaining = |size: u32, at: i32| (i64::from(size) - i64::from(at)).max(0) as u32;
    let req = request.or(wish);
    Expanse::new(
        req.w.cells().unwrap_or_else(|| remaining(screen.w, pos.x)),
        req.h.cells().unwrap_or_else(|| remaining(screen.h, pos.y)),
    )
}

/// Placement of children inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Arrangement {
    /// Children sit at their requested positions.
    #[default]
    Free,
    /// Children are stacked top to bottom.
    Vertical,
    /// Children are stacked left to right.
    Horizontal,
}

/// The geometry state of a single widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Requested position inside the parent, or unset.
    pub pos: Option<Point>,
    /// Requested size.
    pub request: SizeRequest,
    /// The size the widget would like given its content.
    pub wish: SizeRequest,
    /// Real rectangle, relative to the parent's content origin. Only the
    /// parent's layout pass writes this.
    pub real: Rect,
}

impl Geometry {
    /// Size requested for layout: the request, with `Auto` filled from the
    /// wish.
    pub fn effective(&self) -> SizeRequest {
        self.request.or(self.wish)
    }

    /// Real rect for a child at a free position inside a content area of size
    /// `content`. An unset position gets no space at all.
    pub fn free_placement(&self, content: Expanse) -> Rect {
        let Some(pos) = self.pos else {
            return Rect::new(0, 0, 0, 0);
        };
        let available = Expanse::new(
            content.w.saturating_sub(pos.x),
            content.h.saturating_sub(pos.y),
        );
        let size = self.request.negotiate(self.wish, available);
        Rect::new(pos.x, pos.y, size.w, size.h)
    }
}

/// Lay out a stack of children, given each child's effective request, inside
/// a content area.
///
/// Fixed main-axis sizes are clamped to what remains of the area after the
/// children before them; once the area is used up, later children get no
/// space. Children requesting `Auto` on the main axis share whatever the fixed
/// sizes leave, the first of them taking any remainder. On the cross axis,
/// children get their fixed size clamped to the area, or the whole cross
/// extent.
pub fn stack(requests: &[SizeRequest], area: Expanse, vertical: bool) -> Vec<Rect> {
    let main = |r: &SizeRequest| if vertical { r.h } else { r.w };
    let cross = |r: &SizeRequest| if vertical { r.w } else { r.h };
    let (area_main, area_cross) = if vertical {
        (area.h, area.w)
    } else {
        (area.w, area.h)
    };

    let fixed: u32 = requests.iter().filter_map(|r| main(r).cells()).sum();
    let autos = requests.iter().filter(|r| main(r).is_auto()).count() as u32;
    let spare = area_main.saturating_sub(fixed);
    let (share, extra) = if autos == 0 {
        (0, 0)
    } else {
        (spare / autos, spare % autos)
    };

    let mut out = Vec::with_capacity(requests.len());
    let mut offset = 0u32;
    let mut first_auto = true;
    for r in requests {
        let wanted = match main(r).cells() {
            Some(n) => n,
            None => {
                let n = if first_auto { share + extra } else { share };
                first_auto = false;
                n
            }
        };
        let len = wanted.min(area_main - offset);
        let breadth = cross(r).resolve(area_cross);
        let size = collapse(if vertical {
            Expanse::new(breadth, len)
        } else {
            Expanse::new(len, breadth)
        });
        let rect = if vertical {
            Rect::new(0, offset, size.w, size.h)
        } else {
            Rect::new(offset, 0, size.w, size.h)
        };
        out.push(rect);
        offset += len;
    }
    out
}

/// The wish size of a stack: the widest cross extent and the sum of fixed
/// main-axis lengths. Dimensions nobody fixes stay `Auto`.
pub fn stack_wish(requests: &[SizeRequest], vertical: bool) -> SizeRequest {
    let main = |r: &SizeRequest| if vertical { r.h } else { r.w };
    let cross = |r: &SizeRequest| if vertical { r.w } else { r.h };
    let sum = requests
        .iter()
        .filter_map(|r| main(r).cells())
        .reduce(|a, b| a + b);
    let widest = requests.iter().filter_map(|r| cross(r).cells()).max();
    let (main, cross) = (
        sum.map_or(Extent::Auto, Extent::Cells),
        widest.map_or(Extent::Auto, Extent::Cells),
    );
    if vertical {
        SizeRequest { w: cross, h: main }
    } else {
        SizeRequest { w: main, h: cross }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn fixed_is_clamped_to_offer() {
        let r = SizeRequest::fixed(10, 3);
        assert_eq!(
            r.negotiate(SizeRequest::AUTO, Expanse::new(20, 20)),
            Expanse::new(10, 3)
        );
        assert_eq!(
            r.negotiate(SizeRequest::AUTO, Expanse::new(4, 20)),
            Expanse::new(4, 3)
        );
    }

    #[test]
    fn auto_prefers_wish_then_offer() {
        let r = SizeRequest::AUTO;
        let wish = SizeRequest::new(5, Extent::Auto);
        assert_eq!(r.negotiate(wish, Expanse::new(8, 6)), Expanse::new(5, 6));
        assert_eq!(
            r.negotiate(SizeRequest::AUTO, Expanse::new(8, 6)),
            Expanse::new(8, 6)
        );
    }

    #[test]
    fn zero_dimension_collapses() {
        let r = SizeRequest::new(0, 4);
        assert_eq!(
            r.negotiate(SizeRequest::AUTO, Expanse::new(8, 6)),
            Expanse::default()
        );
        assert_eq!(
            SizeRequest::AUTO.negotiate(SizeRequest::AUTO, Expanse::new(8, 0)),
            Expanse::default()
        );
    }

    #[test]
    fn windows_resolve_against_screen() {
        let screen = Expanse::new(80, 24);
        assert_eq!(
            negotiate_window(
                PointI32::new(10, 4),
                SizeRequest::AUTO,
                SizeRequest::AUTO,
                screen
            ),
            Expanse::new(70, 20)
        );
        assert_eq!(
            negotiate_window(
                PointI32::new(90, -2),
                SizeRequest::AUTO,
                SizeRequest::AUTO,
                screen
            ),
            Expanse::new(0, 26)
        );
        assert_eq!(
            negotiate_window(
                PointI32::new(70, 0),
                SizeRequest::fixed(30, 5),
                SizeRequest::AUTO,
                screen
            ),
            Expanse::new(30, 5)
        );
    }

    #[test]
    fn free_placement() {
        let g = Geometry {
            pos: Some(Point { x: 6, y: 1 }),
            request: SizeRequest::fixed(10, 1),
            ..Default::default()
        };
        assert_eq!(g.free_placement(Expanse::new(10, 5)), Rect::new(6, 1, 4, 1));
        let unset = Geometry {
            pos: None,
            ..g
        };
        assert!(unset.free_placement(Expanse::new(10, 5)).is_zero());
    }

    #[test]
    fn stacks_share_space() {
        let reqs = [
            SizeRequest::new(Extent::Auto, 1),
            SizeRequest::AUTO,
            SizeRequest::new(4, 2),
            SizeRequest::AUTO,
        ];
        let rects = stack(&reqs, Expanse::new(10, 8), true);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 10, 1),
                Rect::new(0, 1, 10, 3),
                Rect::new(0, 4, 4, 2),
                Rect::new(0, 6, 10, 2),
            ]
        );
        assert_eq!(stack_wish(&reqs, true), SizeRequest::new(4, 3));
    }

    #[test]
    fn stacks_clamp_to_area() {
        let reqs = [SizeRequest::new(3, 4), SizeRequest::new(3, 4)];
        let rects = stack(&reqs, Expanse::new(2, 5), false);
        assert_eq!(rects, vec![Rect::new(0, 0, 2, 4), Rect::new(2, 0, 0, 0)]);

        let reqs = [SizeRequest::new(Extent::Auto, 9), SizeRequest::AUTO];
        let rects = stack(&reqs, Expanse::new(10, 5), true);
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 5), Rect::new(0, 5, 0, 0)]);
    }

    fn extent() -> impl Strategy<Value = Extent> {
        prop_oneof![Just(Extent::Auto), (0u32..50).prop_map(Extent::Cells)]
    }

    fn request() -> impl Strategy<Value = SizeRequest> {
        (extent(), extent()).prop_map(|(w, h)| SizeRequest { w, h })
    }

    proptest! {
        #[test]
        fn negotiation_never_exceeds_offer(
            req in request(),
            wish in request(),
            w in 0u32..60,
            h in 0u32..60,
        ) {
            let got = req.negotiate(wish, Expanse::new(w, h));
            prop_assert!(got.w <= w && got.h <= h);
            prop_assert!(got.w == 0 || got.h != 0);
        }

        #[test]
        fn stack_fits_area(
            reqs in prop::collection::vec(request(), 0..8),
            w in 0u32..40,
            h in 0u32..40,
            vertical in any::<bool>(),
        ) {
            let rects = stack(&reqs, Expanse::new(w, h), vertical);
            prop_assert_eq!(rects.len(), reqs.len());
            for r in &rects {
                prop_assert!(r.tl.x + r.w <= w, "{r:?} overflows width {w}");
                prop_assert!(r.tl.y + r.h <= h, "{r:?} overflows height {h}");
            }
        }
    }
}
