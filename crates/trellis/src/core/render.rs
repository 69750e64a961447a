use unicode_segmentation::UnicodeSegmentation;

use super::termbuf::TermBuf;
use crate::{
    core::text,
    error::Result,
    geom::{Expanse, Frame, Line, Point, PointI32, Rect, RectI32},
    style::{Palette, Style, StyleMap},
};

/// The trait implemented by terminal drivers.
pub trait RenderBackend {
    /// Apply a style to the following text output.
    fn style(&mut self, style: &Style) -> Result<()>;
    /// Output text at a screen location. This method is used for all text
    /// output.
    fn text(&mut self, loc: Point, txt: &str) -> Result<()>;
    /// Clear the whole screen.
    fn clear(&mut self) -> Result<()>;
    /// Flush output to the terminal.
    fn flush(&mut self) -> Result<()>;
}

/// Line-drawing glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Horizontal line.
    Horizontal,
    /// Vertical line.
    Vertical,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl Glyph {
    /// The box-drawing character for this glyph.
    pub fn char(self) -> char {
        match self {
            Self::Horizontal => '─',
            Self::Vertical => '│',
            Self::TopLeft => '┌',
            Self::TopRight => '┐',
            Self::BottomLeft => '└',
            Self::BottomRight => '┘',
        }
    }
}

/// A drawing surface for one widget.
///
/// Coordinates are local to the widget: `(0, 0)` is its top-left cell and
/// [`Render::size`] its real size. The widget's origin may lie outside the
/// target buffer when it is scrolled or partly off screen. Every write is
/// clipped to the region the widget was given, so a widget can never draw
/// over its neighbours.
pub struct Render<'a> {
    /// The buffer drawn into.
    buf: &'a mut TermBuf,
    /// Style table.
    styles: &'a StyleMap,
    /// Colour pair allocator.
    palette: &'a mut Palette,
    /// Visible region, in buffer coordinates.
    clip: Rect,
    /// The widget origin, in buffer coordinates.
    origin: PointI32,
    /// The widget's real size.
    size: Expanse,
}

impl<'a> Render<'a> {
    /// Construct a renderer for a widget at `origin` with real size `size`,
    /// clipped to `clip`.
    pub fn new(
        buf: &'a mut TermBuf,
        styles: &'a StyleMap,
        palette: &'a mut Palette,
        clip: Rect,
        origin: PointI32,
        size: Expanse,
    ) -> Self {
        let clip = RectI32::at(origin, size)
            .intersect_rect(clip)
            .and_then(|c| c.intersect(&buf.rect()))
            .unwrap_or_default();
        Render {
            buf,
            styles,
            palette,
            clip,
            origin,
            size,
        }
    }

    /// The widget's real size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// The widget's area in local coordinates.
    pub fn area(&self) -> Rect {
        self.size.rect()
    }

    /// Resolve a style name and make sure the terminal can show it.
    pub fn style(&mut self, name: &str) -> Result<Style> {
        let style = self.styles.get(name);
        self.palette.allocate(&style)?;
        Ok(style)
    }

    /// Map a local point into the buffer, if it is visible.
    fn map(&self, x: i64, y: i64) -> Option<Point> {
        let x = i64::from(self.origin.x) + x;
        let y = i64::from(self.origin.y) + y;
        if x < 0 || y < 0 {
            return None;
        }
        let p = Point {
            x: u32::try_from(x).ok()?,
            y: u32::try_from(y).ok()?,
        };
        self.clip.contains_point(p).then_some(p)
    }

    /// Map a local rect into the buffer, clipped.
    fn map_rect(&self, r: Rect) -> Option<Rect> {
        RectI32::at(self.origin + PointI32::from(r.tl), r.expanse()).intersect_rect(self.clip)
    }

    /// Fill a rectangle with a character.
    pub fn fill(&mut self, style: &str, r: Rect, c: char) -> Result<()> {
        let style = self.style(style)?;
        if let Some(target) = self.map_rect(r) {
            self.buf.fill(&style, target, c);
        }
        Ok(())
    }

    /// Put a single character.
    pub fn put(&mut self, style: &str, p: Point, c: char) -> Result<()> {
        let style = self.style(style)?;
        if let Some(at) = self.map(p.x.into(), p.y.into()) {
            self.buf.put(at, text::display_char(c), style);
        }
        Ok(())
    }

    /// Put a line-drawing glyph.
    pub fn glyph(&mut self, style: &str, p: Point, g: Glyph) -> Result<()> {
        self.put(style, p, g.char())
    }

    /// Draw a horizontal rule along a line.
    pub fn hline(&mut self, style: &str, l: Line) -> Result<()> {
        self.fill(style, l.rect(), Glyph::Horizontal.char())
    }

    /// Draw a box outline around a rectangle.
    pub fn border(&mut self, style: &str, r: Rect) -> Result<()> {
        let f = Frame::new(r, 1);
        self.fill(style, f.top, Glyph::Horizontal.char())?;
        self.fill(style, f.bottom, Glyph::Horizontal.char())?;
        self.fill(style, f.left, Glyph::Vertical.char())?;
        self.fill(style, f.right, Glyph::Vertical.char())?;
        self.fill(style, f.topleft, Glyph::TopLeft.char())?;
        self.fill(style, f.topright, Glyph::TopRight.char())?;
        self.fill(style, f.bottomleft, Glyph::BottomLeft.char())?;
        self.fill(style, f.bottomright, Glyph::BottomRight.char())
    }

    /// Draw a solid frame.
    pub fn solid_frame(&mut self, style: &str, f: Frame, c: char) -> Result<()> {
        for r in [
            f.top,
            f.left,
            f.right,
            f.bottom,
            f.topleft,
            f.topright,
            f.bottomleft,
            f.bottomright,
        ] {
            self.fill(style, r, c)?;
        }
        Ok(())
    }

    /// Print text in the specified line. If the text is wider than the line
    /// it is truncated; if it is shorter, the rest of the line is padded with
    /// spaces. A wide character that does not fit whole is replaced by a
    /// space.
    pub fn text(&mut self, style: &str, l: Line, txt: &str) -> Result<()> {
        let style = self.style(style)?;
        let shown: String = txt.chars().map(text::display_char).collect();
        let y = i64::from(l.tl.y);
        let end = u64::from(l.tl.x) + u64::from(l.w);
        let mut x = u64::from(l.tl.x);
        for grapheme in shown.graphemes(true) {
            let width = u64::from(text::grapheme_width(grapheme));
            if width == 0 {
                continue;
            }
            if x + width > end {
                break;
            }
            let first = self.map(x as i64, y);
            let last = self.map((x + width - 1) as i64, y);
            match (first, last) {
                (Some(p), Some(_)) => {
                    self.buf.put_grapheme(p, grapheme, style.clone());
                    for i in 1..width {
                        if let Some(c) = self.map((x + i) as i64, y) {
                            self.buf.put_continuation(c, style.clone());
                        }
                    }
                }
                _ => {
                    for i in 0..width {
                        if let Some(c) = self.map((x + i) as i64, y) {
                            self.buf.put(c, ' ', style.clone());
                        }
                    }
                }
            }
            x += width;
        }
        while x < end {
            if let Some(c) = self.map(x as i64, y) {
                self.buf.put(c, ' ', style.clone());
            }
            x += 1;
        }
        Ok(())
    }
}
