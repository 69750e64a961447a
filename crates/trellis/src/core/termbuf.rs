use unicode_segmentation::UnicodeSegmentation;

use crate::{
    core::text,
    error::Result,
    geom::{Expanse, Point, Rect},
    render::RenderBackend,
    style::Style,
};

/// NULL character constant.
const NULL: char = '\0';

/// A terminal cell with glyph and style.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Base glyph character.
    pub ch: char,
    /// Additional grapheme characters stored with the base glyph.
    pub suffix: String,
    /// Style applied to the cell.
    pub style: Style,
    /// True when this cell continues a wide glyph from the previous column.
    pub continuation: bool,
}

impl Cell {
    /// Construct a cell containing a single glyph.
    fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            suffix: String::new(),
            style,
            continuation: false,
        }
    }

    /// Construct an empty cell.
    fn empty(style: Style) -> Self {
        Self::new(NULL, style)
    }

    /// Return true when the cell is empty.
    pub(crate) fn is_empty(&self) -> bool {
        self.ch == NULL && self.suffix.is_empty() && !self.continuation
    }

    /// Return a display character for tests and debugging.
    pub(crate) fn display_char(&self) -> char {
        if self.is_empty() || self.continuation {
            NULL
        } else {
            self.ch
        }
    }

    /// Append this cell's renderable text to the output buffer.
    fn push_text(&self, out: &mut String) {
        if self.continuation {
            return;
        }
        if self.is_empty() {
            out.push(' ');
            return;
        }
        out.push(self.ch);
        out.push_str(&self.suffix);
    }
}

/// A 2D terminal buffer of styled cells.
#[derive(Clone, Debug)]
pub struct TermBuf {
    /// Buffer size in cells.
    pub(crate) size: Expanse,
    /// Backing cell storage.
    pub(crate) cells: Vec<Cell>,
}

impl TermBuf {
    /// Construct a buffer filled with the given character and style.
    pub fn new(size: impl Into<Expanse>, ch: char, style: Style) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell::new(ch, style); size.area() as usize],
        }
    }

    /// Create an empty TermBuf filled with NULL characters.
    pub fn empty(size: impl Into<Expanse>) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell::empty(Style::default()); size.area() as usize],
        }
    }

    /// Return the buffer size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return the buffer bounds as a rectangle.
    pub fn rect(&self) -> Rect {
        self.size.rect()
    }

    /// Convert a point into a cell index.
    fn idx(&self, p: Point) -> Option<usize> {
        if self.rect().contains_point(p) {
            Some(p.y as usize * self.size.w as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Get a cell by position.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Write a cell at a specific point.
    pub(crate) fn put(&mut self, p: Point, ch: char, style: Style) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = Cell::new(ch, style);
        }
    }

    /// Write a grapheme cluster at a specific point.
    pub(crate) fn put_grapheme(&mut self, p: Point, grapheme: &str, style: Style) {
        if let Some(i) = self.idx(p) {
            let mut chars = grapheme.chars();
            let ch = chars.next().unwrap_or(' ');
            self.cells[i] = Cell {
                ch,
                suffix: chars.collect(),
                style,
                continuation: false,
            };
        }
    }

    /// Write a continuation cell for a wide glyph.
    pub(crate) fn put_continuation(&mut self, p: Point, style: Style) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = Cell {
                continuation: true,
                ..Cell::empty(style)
            };
        }
    }

    /// Fill a rectangle with a glyph and style.
    pub fn fill(&mut self, style: &Style, r: Rect, ch: char) {
        if let Some(isec) = self.rect().intersect(&r) {
            for y in isec.tl.y..isec.bottom() {
                for x in isec.tl.x..isec.right() {
                    self.put(Point { x, y }, ch, style.clone());
                }
            }
        }
    }

    /// Draw text from the start of row `y` at column `x`, clipped to the
    /// buffer. Control characters are shown as control pictures.
    pub fn text(&mut self, style: &Style, p: Point, txt: &str) {
        let mut x = p.x;
        let shown: String = txt.chars().map(text::display_char).collect();
        for grapheme in shown.graphemes(true) {
            let width = text::grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if x + width > self.size.w {
                break;
            }
            self.put_grapheme(Point { x, y: p.y }, grapheme, style.clone());
            for i in 1..width {
                self.put_continuation(Point { x: x + i, y: p.y }, style.clone());
            }
            x += width;
        }
    }

    /// Copy the `src_rect` region of `src` so that its top-left lands on
    /// `dest`. The copy is clipped to both buffers.
    pub fn blit(&mut self, src: &Self, src_rect: Rect, dest: Point) {
        let Some(src_rect) = src.rect().intersect(&src_rect) else {
            return;
        };
        for dy in 0..src_rect.h {
            for dx in 0..src_rect.w {
                let from = Point {
                    x: src_rect.tl.x + dx,
                    y: src_rect.tl.y + dy,
                };
                let to = Point {
                    x: dest.x + dx,
                    y: dest.y + dy,
                };
                if let (Some(cell), Some(i)) = (src.get(from), self.idx(to)) {
                    self.cells[i] = cell.clone();
                }
            }
        }
    }

    /// Diff this terminal buffer against a previous state, emitting only the
    /// changed runs to the backend.
    pub fn diff<R: RenderBackend>(&self, prev: &Self, backend: &mut R) -> Result<()> {
        if self.size != prev.size {
            return self.render(backend);
        }
        let mut wrote = false;
        let width = self.size.w as usize;
        for y in 0..self.size.h {
            let row_start = y as usize * width;
            let current_row = &self.cells[row_start..row_start + width];
            let prev_row = &prev.cells[row_start..row_start + width];
            if current_row == prev_row {
                continue;
            }

            let mut x = 0usize;
            while x < width {
                if current_row[x] == prev_row[x] {
                    x += 1;
                    continue;
                }
                let style = &current_row[x].style;
                let start_x = x;
                let mut text = String::new();
                while x < width {
                    let cell = &current_row[x];
                    if cell == &prev_row[x] || cell.style != *style {
                        break;
                    }
                    cell.push_text(&mut text);
                    x += 1;
                }
                backend.style(style)?;
                backend.text(
                    Point {
                        x: start_x as u32,
                        y,
                    },
                    &text,
                )?;
                wrote = true;
            }
        }
        if wrote {
            backend.flush()?;
        }
        Ok(())
    }

    /// Render this terminal buffer in full, batching runs of text with the
    /// same style.
    pub fn render<R: RenderBackend>(&self, backend: &mut R) -> Result<()> {
        let mut wrote = false;
        let width = self.size.w as usize;
        for y in 0..self.size.h {
            let row = &self.cells[y as usize * width..(y as usize + 1) * width];
            let mut x = 0;
            while x < width {
                let style = &row[x].style;
                let start_x = x;
                let mut text = String::new();
                while x < width && row[x].style == *style {
                    row[x].push_text(&mut text);
                    x += 1;
                }
                backend.style(style)?;
                backend.text(
                    Point {
                        x: start_x as u32,
                        y,
                    },
                    &text,
                )?;
                wrote = true;
            }
        }
        if wrote {
            backend.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buf, style::Color, testing::buf::BufTest};

    /// Backend recording every call.
    #[derive(Default)]
    struct RecBackend {
        /// Text writes.
        text: Vec<(Point, String)>,
        /// Flush count.
        flushes: usize,
    }

    impl RenderBackend for RecBackend {
        fn style(&mut self, _style: &Style) -> Result<()> {
            Ok(())
        }

        fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
            self.text.push((loc, txt.into()));
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn wide_text_is_clipped_whole() {
        let mut tb = TermBuf::empty((5, 1));
        tb.text(&Style::default(), Point { x: 0, y: 0 }, "ab界界");
        BufTest::new(&tb).assert_matches(buf!["ab界X"]);
        assert!(tb.get(Point { x: 3, y: 0 }).is_some_and(|c| c.continuation));
    }

    #[test]
    fn control_pictures() {
        let mut tb = TermBuf::empty((3, 1));
        tb.text(&Style::default(), Point { x: 0, y: 0 }, "a\u{1}");
        BufTest::new(&tb).assert_matches(buf!["a\u{2401}X"]);
    }

    #[test]
    fn blit_clips() {
        let mut dst = TermBuf::new((4, 2), '.', Style::default());
        let src = TermBuf::new((3, 3), '#', Style::default());
        dst.blit(&src, Rect::new(1, 1, 2, 2), Point { x: 3, y: 1 });
        BufTest::new(&dst).assert_matches(buf!["...." "...#"]);
    }

    #[test]
    fn diff_emits_changes_only() -> Result<()> {
        let prev = TermBuf::new((4, 2), ' ', Style::default());
        let mut cur = prev.clone();
        cur.put(Point { x: 1, y: 1 }, 'x', Style::default());
        cur.put(Point { x: 2, y: 1 }, 'y', Style::default());
        cur.put(
            Point { x: 3, y: 1 },
            'z',
            Style {
                fg: Color::Red,
                ..Style::default()
            },
        );
        let mut be = RecBackend::default();
        cur.diff(&prev, &mut be)?;
        assert_eq!(
            be.text,
            vec![
                (Point { x: 1, y: 1 }, "xy".into()),
                (Point { x: 3, y: 1 }, "z".into())
            ]
        );
        assert_eq!(be.flushes, 1);

        let mut be = RecBackend::default();
        cur.diff(&cur.clone(), &mut be)?;
        assert!(be.text.is_empty());
        assert_eq!(be.flushes, 0);
        Ok(())
    }

    #[test]
    fn full_render_batches_styles() -> Result<()> {
        let mut tb = TermBuf::new((3, 1), ' ', Style::default());
        tb.put(Point { x: 2, y: 0 }, 'q', Style::default().reversed());
        let mut be = RecBackend::default();
        tb.render(&mut be)?;
        assert_eq!(
            be.text,
            vec![
                (Point { x: 0, y: 0 }, "  ".into()),
                (Point { x: 2, y: 0 }, "q".into())
            ]
        );
        Ok(())
    }
}
