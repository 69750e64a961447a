use std::iter;

/// Default number of spare cells kept in the gap after a reallocation.
pub const DEFAULT_GAP_SIZE: usize = 20;

/// Character storage with a movable gap. Text before the gap lives at
/// `buf[..gap_start]`, text after it at `buf[gap_end..]`; positions are
/// logical character offsets that never count the gap.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// Backing store, including the gap.
    buf: Vec<char>,
    /// First index of the gap.
    gap_start: usize,
    /// One past the last index of the gap.
    gap_end: usize,
    /// Slack added on every growth.
    slack: usize,
}

impl GapBuffer {
    /// Build a buffer holding `text`, with the gap at the end.
    pub fn new(text: &str, slack: usize) -> Self {
        let mut buf: Vec<char> = text.chars().collect();
        let gap_start = buf.len();
        buf.extend(iter::repeat_n('\0', slack));
        Self {
            gap_end: buf.len(),
            buf,
            gap_start,
            slack,
        }
    }

    /// Number of characters stored.
    pub fn len(&self) -> usize {
        self.buf.len() - self.gap_len()
    }

    /// True if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current size of the gap.
    pub fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Logical position of the gap.
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    /// Character at logical position `pos`.
    pub fn get(&self, pos: usize) -> Option<char> {
        if pos < self.gap_start {
            self.buf.get(pos).copied()
        } else {
            self.buf.get(pos + self.gap_len()).copied()
        }
    }

    /// Characters in the logical range `[start, end)`.
    pub fn chars(&self, start: usize, end: usize) -> impl Iterator<Item = char> + '_ {
        let end = end.min(self.len());
        (start.min(end)..end).filter_map(|p| self.get(p))
    }

    /// Move the gap so that it begins at logical position `pos`, clamped to
    /// the text length.
    pub fn move_gap(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        if pos < self.gap_start {
            let n = self.gap_start - pos;
            self.buf
                .copy_within(pos..self.gap_start, self.gap_end - n);
            self.gap_start = pos;
            self.gap_end -= n;
        } else if pos > self.gap_start {
            let n = pos - self.gap_start;
            self.buf
                .copy_within(self.gap_end..self.gap_end + n, self.gap_start);
            self.gap_start += n;
            self.gap_end += n;
        }
    }

    /// Insert characters at `pos`. Returns true if the gap had to be
    /// reallocated to make room.
    pub fn insert(&mut self, pos: usize, text: &[char]) -> bool {
        self.move_gap(pos);
        let grew = text.len() > self.gap_len();
        if grew {
            let extra = text.len() + self.slack;
            self.buf
                .splice(self.gap_end..self.gap_end, iter::repeat_n('\0', extra));
            self.gap_end += extra;
        }
        self.buf[self.gap_start..self.gap_start + text.len()].copy_from_slice(text);
        self.gap_start += text.len();
        grew
    }

    /// Remove the logical range `[start, end)` by widening the gap over it.
    pub fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        self.move_gap(start);
        self.gap_end += end - start;
    }

    /// Move the gap to the end so the text is contiguous, and return it.
    pub fn make_contiguous(&mut self) -> &[char] {
        self.move_gap(self.len());
        &self.buf[..self.gap_start]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(g: &GapBuffer) -> String {
        g.chars(0, g.len()).collect()
    }

    #[test]
    fn insert_moves_gap() {
        let mut g = GapBuffer::new("hello", 4);
        assert!(!g.insert(0, &['>', ' ']));
        assert_eq!(g.gap_position(), 2);
        assert_eq!(text(&g), "> hello");
        assert!(!g.insert(7, &['!']));
        assert_eq!(text(&g), "> hello!");
        assert_eq!(g.gap_len(), 1);
    }

    #[test]
    fn insert_grows_with_slack() {
        let mut g = GapBuffer::new("ab", 2);
        let grew = g.insert(1, &['x', 'y', 'z']);
        assert!(grew);
        assert_eq!(text(&g), "axyzb");
        assert_eq!(g.gap_len(), 4);
    }

    #[test]
    fn remove_widens_gap() {
        let mut g = GapBuffer::new("abcdef", 0);
        g.remove(1, 3);
        assert_eq!(text(&g), "adef");
        assert_eq!(g.gap_position(), 1);
        g.remove(3, 10);
        assert_eq!(text(&g), "ade");
        g.remove(2, 2);
        assert_eq!(text(&g), "ade");
    }

    #[test]
    fn contiguous() {
        let mut g = GapBuffer::new("abc", 5);
        g.move_gap(1);
        assert_eq!(g.get(1), Some('b'));
        assert_eq!(g.make_contiguous(), &['a', 'b', 'c']);
        assert_eq!(g.gap_position(), 3);
        assert_eq!(g.get(3), None);
    }
}
