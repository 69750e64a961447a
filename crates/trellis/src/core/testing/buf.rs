//! Utilities for working with TermBufs in tests.
use crate::{core::termbuf::TermBuf, geom::Point};

/// A helper macro to create buffers for the termbuf match assertions.
#[macro_export]
macro_rules! buf {
    ($($line:literal)*) => {
        &[$($line),*]
    };
}

/// Assertions over the contents of a [`TermBuf`]. By default 'X' stands for
/// a NULL cell, so partial renders can be checked. The second half of a wide
/// character is skipped, so `"界"` matches the two cells it covers.
pub struct BufTest<'a> {
    /// Reference to the buffer under test.
    buf: &'a TermBuf,
    /// Character used to represent NULL cells.
    null_char: char,
    /// Optional wildcard character.
    any_char: Option<char>,
}

impl<'a> BufTest<'a> {
    /// Create a new BufTest with a reference to a TermBuf.
    pub fn new(buf: &'a TermBuf) -> Self {
        Self {
            buf,
            null_char: 'X',
            any_char: None,
        }
    }

    /// Set the character used to match NULL cells in the buffer.
    pub fn with_null(mut self, null_char: char) -> Self {
        self.null_char = null_char;
        self
    }

    /// Set a character that matches any cell.
    pub fn with_any(mut self, any_char: char) -> Self {
        self.any_char = Some(any_char);
        self
    }

    /// The characters of row `y`, NULL cells mapped to the null character.
    fn row(&self, y: u32) -> Vec<char> {
        (0..self.buf.size().w)
            .filter_map(|x| self.buf.get(Point { x, y }))
            .filter(|c| !c.continuation)
            .map(|c| match c.display_char() {
                '\0' => self.null_char,
                ch => ch,
            })
            .collect()
    }

    /// Returns true if the buffer content matches the expected lines.
    /// Trailing spaces are ignored on both sides.
    pub fn matches(&self, expected: &[&str]) -> bool {
        if expected.len() != self.buf.size().h as usize {
            return false;
        }
        expected.iter().enumerate().all(|(y, line)| {
            let actual: String = self.row(y as u32).into_iter().collect();
            let actual: Vec<char> = actual.trim_end().chars().collect();
            let expected: Vec<char> = line.trim_end().chars().collect();
            actual.len() == expected.len()
                && expected
                    .iter()
                    .zip(&actual)
                    .all(|(e, a)| Some(*e) == self.any_char || e == a)
        })
    }

    /// Assert that the buffer matches, printing both on failure.
    pub fn assert_matches(&self, expected: &[&str]) {
        if !self.matches(expected) {
            println!("\nExpected:");
            for line in expected {
                println!("│{line}│");
            }
            println!("\nActual:");
            for line in self.lines() {
                println!("│{line}│");
            }
            panic!("Buffer contents did not match expected pattern");
        }
    }

    /// Does the buffer contain the supplied substring on any line?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }

    /// Return the contents of the buffer as lines of text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.buf.size().h)
            .map(|y| self.row(y).into_iter().collect())
            .collect()
    }
}
