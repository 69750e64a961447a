use crate::{
    error::Result,
    geom::{Expanse, Point},
    render::RenderBackend,
    style::Style,
};

/// A render backend that draws into an in-memory grid of characters and
/// counts what it was asked to do.
#[derive(Debug, Clone)]
pub struct TestRender {
    /// Screen contents.
    pub cells: Vec<Vec<char>>,
    /// Number of `text` calls since creation.
    pub writes: usize,
    /// Number of `clear` calls since creation.
    pub clears: usize,
    /// Number of `flush` calls since creation.
    pub flushes: usize,
}

impl TestRender {
    /// A blank screen of the given size.
    pub fn new(size: Expanse) -> Self {
        Self {
            cells: vec![vec![' '; size.w as usize]; size.h as usize],
            writes: 0,
            clears: 0,
            flushes: 0,
        }
    }

    /// The screen as lines of text.
    pub fn lines(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    /// Does any line contain `txt`?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }
}

impl RenderBackend for TestRender {
    fn style(&mut self, _s: &Style) -> Result<()> {
        Ok(())
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        self.writes += 1;
        if let Some(row) = self.cells.get_mut(loc.y as usize) {
            for (i, ch) in txt.chars().enumerate() {
                if let Some(c) = row.get_mut(loc.x as usize + i) {
                    *c = ch;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        for row in &mut self.cells {
            row.fill(' ');
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
