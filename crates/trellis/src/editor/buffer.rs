use std::mem;

use super::{
    gap::{DEFAULT_GAP_SIZE, GapBuffer},
    wrap::{self, ScreenLine},
};
use crate::core::text::{DEFAULT_TAB_STOP, char_width, is_blank};

/// Direction of a cursor motion or deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the start of the text.
    Backward,
    /// Toward the end of the text.
    Forward,
}

/// How much text a deletion removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteExtent {
    /// A single character.
    Char,
    /// Up to the next word boundary.
    Word,
    /// Up to the end (or start) of the logical line.
    LineEnd,
}

/// Step size of a cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One character.
    Char,
    /// One word.
    Word,
    /// One displayed row, keeping the column.
    DisplayLine,
    /// The start or end of the displayed row.
    DisplayLineEnd,
}

/// The cursor's on-screen placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// Index into the screen-line cache.
    pub row: usize,
    /// Display column within the row.
    pub column: u32,
}

/// An editable text store with a cache of wrapped screen lines.
///
/// The cursor is a logical character offset. Edits happen at the cursor, move
/// the gap there first, and rewrap only the rows near the edit. A full rewrap
/// happens when the gap is reallocated or the wrap width changes.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Character storage.
    text: GapBuffer,
    /// Cursor position in characters.
    cursor: usize,
    /// Maximum row width in cells.
    width: u32,
    /// Tab stop used when measuring.
    tab_stop: u32,
    /// Wrapped rows covering the whole text.
    lines: Vec<ScreenLine>,
    /// The row cache must be rebuilt before the next read.
    dirty: bool,
    /// Column remembered across vertical motion.
    goal_column: Option<u32>,
    /// Slack reserved whenever the storage grows.
    gap_size: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer {
    /// Create a buffer holding `text`, with the cursor at the end and no wrap
    /// width. Rows are produced once a width is set.
    pub fn new(text: &str) -> Self {
        Self::with_gap(text, DEFAULT_GAP_SIZE)
    }

    /// Create a buffer with a specific gap growth slack.
    pub fn with_gap(text: &str, gap_size: usize) -> Self {
        let text = GapBuffer::new(text, gap_size);
        Self {
            cursor: text.len(),
            text,
            width: 0,
            tab_stop: DEFAULT_TAB_STOP,
            lines: Vec::new(),
            dirty: true,
            goal_column: None,
            gap_size,
        }
    }

    /// Builder-style wrap width.
    pub fn wrapped(mut self, width: u32) -> Self {
        self.set_width(width);
        self
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor offset in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current wrap width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Set the wrap width. Rows are rebuilt on the next read.
    pub fn set_width(&mut self, width: u32) {
        if width != self.width {
            self.width = width;
            self.dirty = true;
        }
    }

    /// Set the tab stop. Rows are rebuilt on the next read.
    pub fn set_tab_stop(&mut self, tab_stop: u32) {
        let tab_stop = tab_stop.max(1);
        if tab_stop != self.tab_stop {
            self.tab_stop = tab_stop;
            self.dirty = true;
        }
    }

    /// Tab stop used when measuring.
    pub fn tab_stop(&self) -> u32 {
        self.tab_stop
    }

    /// Place the cursor, clamping to `[0, len]`.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
        self.goal_column = None;
    }

    /// Replace the whole text and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = GapBuffer::new(text, self.gap_size);
        self.cursor = self.text.len();
        self.goal_column = None;
        self.dirty = true;
    }

    /// The full text. The gap is moved to the end first so the storage is
    /// contiguous; this is safe wherever the cursor sits.
    pub fn get_text(&mut self) -> String {
        self.text.make_contiguous().iter().collect()
    }

    /// Characters in `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text.chars(start, end).collect()
    }

    /// Character at a position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos)
    }

    /// Logical position of the storage gap.
    pub fn gap_position(&self) -> usize {
        self.text.gap_position()
    }

    /// The wrapped rows, rebuilding them first if needed.
    pub fn lines(&mut self) -> &[ScreenLine] {
        self.ensure_wrapped();
        &self.lines
    }

    /// Text of one row, without its newline.
    pub fn line_text(&mut self, row: usize) -> Option<String> {
        self.ensure_wrapped();
        let line = *self.lines.get(row)?;
        Some(self.slice(line.start, line.start + line.length))
    }

    /// Rebuild the row cache if it is stale.
    fn ensure_wrapped(&mut self) {
        if self.dirty {
            self.rewrap_all();
        }
    }

    /// Wrap the whole text.
    fn rewrap_all(&mut self) {
        self.lines = wrap::wrap(&self.text, self.width, self.tab_stop);
        self.dirty = false;
        tracing::trace!(rows = self.lines.len(), "full rewrap");
    }

    /// Rewrap after the text in old positions `[edit_start, old_end)` was
    /// replaced by `delta + (old_end - edit_start)` characters. Rows are
    /// recomputed from the earliest row whose scan reaches the edit until a
    /// fresh row matches an old row lying entirely past the edit; from there
    /// on the old rows are reused, shifted by `delta`.
    fn rewrap_edit(&mut self, edit_start: usize, old_end: usize, delta: isize) {
        if self.dirty || self.width == 0 {
            self.dirty = true;
            return;
        }
        let old = mem::take(&mut self.lines);
        let touched = old.partition_point(|l| l.end < edit_start);
        // Rows before the edit can look past their own end when breaking at
        // a word, so walk back to the paragraph start checking each one.
        let mut first = touched;
        for prev in (0..touched).rev() {
            if old[prev].has_newline() {
                break;
            }
            if wrap::reach(&self.text, old[prev].start, self.width, self.tab_stop) >= edit_start {
                first = prev;
            }
        }
        let mut out: Vec<ScreenLine> = old[..first].to_vec();
        let mut pos = out.last().map_or(0, |l| l.end);
        let mut i = first;
        let mut resync = None;
        let mut fresh = 0usize;
        while pos < self.text.len() {
            let line = wrap::screen_line(&self.text, pos, self.width, self.tab_stop);
            pos = line.end;
            out.push(line);
            fresh += 1;
            while i < old.len()
                && (old[i].start < old_end || old[i].shifted(delta).start < line.start)
            {
                i += 1;
            }
            if i < old.len() && old[i].end > old[i].start && old[i].shifted(delta) == line {
                resync = Some(i + 1);
                break;
            }
        }
        match resync {
            Some(next) => out.extend(old[next..].iter().map(|l| l.shifted(delta))),
            None => wrap::push_tail(&self.text, &mut out),
        }
        tracing::trace!(fresh, reused = out.len() - fresh, "incremental rewrap");
        self.lines = out;
    }

    /// Insert text at the cursor and advance the cursor past it.
    pub fn insert(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let chars: Vec<char> = s.chars().collect();
        let at = self.cursor;
        let grew = self.text.insert(at, &chars);
        self.cursor = at + chars.len();
        self.goal_column = None;
        if grew {
            self.dirty = true;
        } else {
            self.rewrap_edit(at, at, chars.len() as isize);
        }
    }

    /// Delete text next to the cursor. Deleting past either end of the text is
    /// a no-op. Returns the number of characters removed.
    pub fn delete(&mut self, direction: Direction, extent: DeleteExtent) -> usize {
        self.goal_column = None;
        let target = match extent {
            DeleteExtent::Char => self.step_char(self.cursor, direction),
            DeleteExtent::Word => self.word_boundary(self.cursor, direction),
            DeleteExtent::LineEnd => {
                let t = self.line_boundary(self.cursor, direction);
                if t == self.cursor {
                    self.step_char(self.cursor, direction)
                } else {
                    t
                }
            }
        };
        let (start, end) = if target < self.cursor {
            (target, self.cursor)
        } else {
            (self.cursor, target)
        };
        if start == end {
            return 0;
        }
        self.text.remove(start, end);
        self.cursor = start;
        self.rewrap_edit(start, end, -((end - start) as isize));
        end - start
    }

    /// Move the cursor.
    pub fn move_cursor(&mut self, granularity: Granularity, direction: Direction) {
        self.ensure_wrapped();
        let goal = self.goal_column.take();
        self.cursor = match granularity {
            Granularity::Char => self.step_char(self.cursor, direction),
            Granularity::Word => self.word_boundary(self.cursor, direction),
            Granularity::DisplayLine => {
                let Some(pos) = self.cursor_position() else {
                    return;
                };
                let goal = goal.unwrap_or(pos.column);
                let target = match direction {
                    Direction::Backward => pos.row.checked_sub(1),
                    Direction::Forward => Some(pos.row + 1).filter(|r| *r < self.lines.len()),
                };
                self.goal_column = Some(goal);
                match target {
                    Some(row) => self.position_at_column(row, goal),
                    None => self.cursor,
                }
            }
            Granularity::DisplayLineEnd => {
                let Some(pos) = self.cursor_position() else {
                    return;
                };
                let line = self.lines[pos.row];
                match direction {
                    Direction::Backward => line.start,
                    Direction::Forward => self.last_position(pos.row, line),
                }
            }
        };
    }

    /// One character before or after `pos`, clamped.
    fn step_char(&self, pos: usize, direction: Direction) -> usize {
        match direction {
            Direction::Backward => pos.saturating_sub(1),
            Direction::Forward => (pos + 1).min(self.len()),
        }
    }

    /// Is the character at `pos` white space for word motion?
    fn is_white(&self, pos: usize) -> bool {
        self.text.get(pos).is_some_and(|c| c == '\n' || is_blank(c))
    }

    /// The next word boundary from `pos`. Forward motion lands on the first
    /// word character after a run of white space. Backward motion always
    /// moves at least one character and lands on the start of a word.
    fn word_boundary(&self, pos: usize, direction: Direction) -> usize {
        match direction {
            Direction::Forward => {
                let len = self.len();
                let mut p = pos;
                let mut white = false;
                while p < len {
                    if self.is_white(p) {
                        white = true;
                    } else if white {
                        break;
                    }
                    p += 1;
                }
                p
            }
            Direction::Backward => {
                if pos == 0 {
                    return 0;
                }
                let mut p = pos - 1;
                while p > 0 && self.is_white(p) {
                    p -= 1;
                }
                while p > 0 && !self.is_white(p - 1) {
                    p -= 1;
                }
                p
            }
        }
    }

    /// The end of the logical line containing `pos` (the position of its
    /// newline, or the text end), or its start when moving backward.
    fn line_boundary(&self, pos: usize, direction: Direction) -> usize {
        match direction {
            Direction::Forward => (pos..self.len())
                .find(|p| self.text.get(*p) == Some('\n'))
                .unwrap_or(self.len()),
            Direction::Backward => (0..pos)
                .rev()
                .find(|p| self.text.get(*p) == Some('\n'))
                .map_or(0, |p| p + 1),
        }
    }

    /// The last position the cursor may take on a row without falling onto
    /// the next one.
    fn last_position(&self, row: usize, line: ScreenLine) -> usize {
        if line.has_newline() || row + 1 == self.lines.len() {
            line.start + line.length
        } else {
            line.end.saturating_sub(1).max(line.start)
        }
    }

    /// The position on `row` whose column is closest to `goal` without
    /// passing it.
    fn position_at_column(&self, row: usize, goal: u32) -> usize {
        let line = self.lines[row];
        let last = self.last_position(row, line);
        let mut col = 0u32;
        let mut p = line.start;
        while p < last {
            let Some(ch) = self.text.get(p) else {
                break;
            };
            let w = char_width(ch, col, self.tab_stop);
            if col + w > goal {
                break;
            }
            col += w;
            p += 1;
        }
        p
    }

    /// Row index containing position `pos`, if any rows exist.
    pub fn row_of(&mut self, pos: usize) -> Option<usize> {
        self.ensure_wrapped();
        if self.lines.is_empty() {
            return None;
        }
        let row = self.lines.partition_point(|l| l.end <= pos);
        Some(row.min(self.lines.len() - 1))
    }

    /// Cursor row and column, or `None` when there are no rows.
    pub fn cursor_position(&mut self) -> Option<CursorPosition> {
        let row = self.row_of(self.cursor)?;
        let line = self.lines[row];
        let column = self
            .text
            .chars(line.start, self.cursor)
            .fold(0, |col, ch| col + char_width(ch, col, self.tab_stop));
        Some(CursorPosition { row, column })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rows(b: &mut TextBuffer) -> Vec<String> {
        let lines = b.lines().to_vec();
        lines.iter().map(|l| b.slice(l.start, l.end)).collect()
    }

    #[test]
    fn insert_newline_into_empty() {
        let mut b = TextBuffer::new("").wrapped(10);
        b.insert("ab\n");
        let lines = b.lines().to_vec();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].length, 2);
        assert_eq!(lines[1].length, 0);
        assert_eq!(b.line_text(0), Some("ab".into()));
        assert_eq!(b.cursor(), 3);
        assert_eq!(
            b.cursor_position(),
            Some(CursorPosition { row: 1, column: 0 })
        );
    }

    #[test]
    fn forced_break() {
        let mut b = TextBuffer::new("wordword").wrapped(4);
        let lines = b.lines().to_vec();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.length == 4));
    }

    #[test]
    fn zero_width_has_no_rows() {
        let mut b = TextBuffer::new("text").wrapped(0);
        b.insert("more");
        assert!(b.lines().is_empty());
        assert_eq!(b.cursor_position(), None);
        b.move_cursor(Granularity::DisplayLine, Direction::Backward);
        assert_eq!(b.cursor(), 8);
    }

    #[test]
    fn delete_at_ends_is_noop() {
        let mut b = TextBuffer::new("abc").wrapped(10);
        assert_eq!(b.delete(Direction::Forward, DeleteExtent::Char), 0);
        b.set_cursor(0);
        assert_eq!(b.delete(Direction::Backward, DeleteExtent::Word), 0);
        assert_eq!(b.get_text(), "abc");
    }

    #[test]
    fn delete_extents() {
        let mut b = TextBuffer::new("one two\nthree").wrapped(20);
        b.set_cursor(4);
        assert_eq!(b.delete(Direction::Forward, DeleteExtent::LineEnd), 3);
        assert_eq!(b.get_text(), "one \nthree");
        assert_eq!(b.delete(Direction::Forward, DeleteExtent::LineEnd), 1);
        assert_eq!(b.get_text(), "one three");
        assert_eq!(b.delete(Direction::Backward, DeleteExtent::Word), 4);
        assert_eq!(b.get_text(), "three");
        assert_eq!(b.cursor(), 0);
        b.set_cursor(99);
        assert_eq!(b.cursor(), 5);
        assert_eq!(b.delete(Direction::Backward, DeleteExtent::Char), 1);
        assert_eq!(b.get_text(), "thre");
    }

    #[test]
    fn word_motion() {
        let mut b = TextBuffer::new("alpha  beta\ngamma").wrapped(40);
        b.set_cursor(0);
        b.move_cursor(Granularity::Word, Direction::Forward);
        assert_eq!(b.cursor(), 7);
        b.move_cursor(Granularity::Word, Direction::Forward);
        assert_eq!(b.cursor(), 12);
        b.move_cursor(Granularity::Word, Direction::Forward);
        assert_eq!(b.cursor(), 17);
        b.move_cursor(Granularity::Word, Direction::Backward);
        assert_eq!(b.cursor(), 12);
        b.move_cursor(Granularity::Word, Direction::Backward);
        assert_eq!(b.cursor(), 7);
        b.set_cursor(9);
        b.move_cursor(Granularity::Word, Direction::Backward);
        assert_eq!(b.cursor(), 7);
    }

    #[test]
    fn vertical_motion_remembers_column() {
        let mut b = TextBuffer::new("abcdef\nab\nabcdef").wrapped(20);
        b.set_cursor(5);
        b.move_cursor(Granularity::DisplayLine, Direction::Forward);
        assert_eq!(b.cursor(), 9);
        b.move_cursor(Granularity::DisplayLine, Direction::Forward);
        assert_eq!(b.cursor(), 15);
        b.move_cursor(Granularity::DisplayLine, Direction::Backward);
        b.move_cursor(Granularity::DisplayLine, Direction::Backward);
        assert_eq!(b.cursor(), 5);
        b.move_cursor(Granularity::DisplayLine, Direction::Backward);
        assert_eq!(b.cursor(), 5);
    }

    #[test]
    fn vertical_motion_over_wide_chars() {
        let mut b = TextBuffer::new("a界b\nxyzw").wrapped(20);
        b.set_cursor(7);
        b.move_cursor(Granularity::DisplayLine, Direction::Backward);
        assert_eq!(b.cursor(), 2);
        assert_eq!(
            b.cursor_position(),
            Some(CursorPosition { row: 0, column: 3 })
        );
    }

    #[test]
    fn line_ends() {
        let mut b = TextBuffer::new("hello world again").wrapped(8);
        assert_eq!(rows(&mut b), vec!["hello ", "world ", "again"]);
        b.set_cursor(8);
        b.move_cursor(Granularity::DisplayLineEnd, Direction::Forward);
        assert_eq!(b.cursor(), 11);
        b.move_cursor(Granularity::DisplayLineEnd, Direction::Backward);
        assert_eq!(b.cursor(), 6);
        b.set_cursor(13);
        b.move_cursor(Granularity::DisplayLineEnd, Direction::Forward);
        assert_eq!(b.cursor(), 17);
    }

    #[test]
    fn get_text_with_cursor_mid_buffer() {
        let mut b = TextBuffer::new("abcdef").wrapped(3);
        b.set_cursor(2);
        b.insert("XY");
        assert_eq!(b.gap_position(), 4);
        assert_eq!(b.get_text(), "abXYcdef");
        assert_eq!(b.cursor(), 4);
        b.insert("Z");
        assert_eq!(b.get_text(), "abXYZcdef");
    }

    #[test]
    fn incremental_rewrap_pulls_word_back() {
        let mut b = TextBuffer::new("aaa bbb").wrapped(5);
        assert_eq!(rows(&mut b), vec!["aaa ", "bbb"]);
        b.delete(Direction::Backward, DeleteExtent::Char);
        assert_eq!(rows(&mut b), vec!["aaa ", "bb"]);
        b.delete(Direction::Backward, DeleteExtent::Char);
        assert_eq!(rows(&mut b), vec!["aaa b"]);
        b.insert("bb");
        assert_eq!(rows(&mut b), vec!["aaa ", "bbb"]);
    }

    fn edit_strategy() -> impl Strategy<Value = Vec<(u8, usize, String)>> {
        proptest::collection::vec(
            (0u8..6, 0usize..64, "[a-c \n\t界]{0,6}"),
            0..24,
        )
    }

    fn apply(b: &mut TextBuffer, op: u8, pos: usize, s: &str) {
        b.set_cursor(pos);
        match op {
            0 | 1 => b.insert(s),
            2 => {
                b.delete(Direction::Forward, DeleteExtent::Char);
            }
            3 => {
                b.delete(Direction::Backward, DeleteExtent::Word);
            }
            4 => {
                b.delete(Direction::Forward, DeleteExtent::LineEnd);
            }
            _ => b.move_cursor(Granularity::DisplayLine, Direction::Forward),
        }
    }

    proptest! {
        #[test]
        fn rows_reproduce_text(init in "[a-c \n]{0,20}", edits in edit_strategy(), width in 1u32..12) {
            let mut b = TextBuffer::with_gap(&init, 4).wrapped(width);
            for (op, pos, s) in &edits {
                apply(&mut b, *op, *pos, s);
                let joined: String = rows(&mut b).concat();
                prop_assert_eq!(joined, b.get_text());
            }
        }

        #[test]
        fn incremental_matches_full_rewrap(init in "[a-c \n]{0,20}", edits in edit_strategy(), width in 1u32..12) {
            let mut b = TextBuffer::with_gap(&init, 64).wrapped(width);
            for (op, pos, s) in &edits {
                apply(&mut b, *op, *pos, s);
            }
            let incremental = b.lines().to_vec();
            let text = b.get_text();
            let mut fresh = TextBuffer::new(&text).wrapped(width);
            prop_assert_eq!(incremental, fresh.lines().to_vec());
        }

        #[test]
        fn rewrap_is_idempotent(text in "[a-c \n\t]{0,40}", width in 1u32..12) {
            let mut b = TextBuffer::new(&text).wrapped(width);
            let first = b.lines().to_vec();
            b.set_width(width + 1);
            b.set_width(width);
            prop_assert_eq!(first, b.lines().to_vec());
        }

        #[test]
        fn cursor_always_in_bounds(text in "[a-c \n]{0,30}", edits in edit_strategy(), width in 1u32..8) {
            let mut b = TextBuffer::new(&text).wrapped(width);
            for (op, pos, s) in &edits {
                apply(&mut b, *op, *pos, s);
                prop_assert!(b.cursor() <= b.len());
                let pos = b.cursor_position();
                prop_assert!(pos.is_some_and(|p| p.row < b.lines().len()));
            }
        }
    }
}
