use super::gap::GapBuffer;
use crate::core::text::{char_width, is_blank};

/// One row of wrapped text: the half-open span `[start, end)` of logical
/// character positions it covers. A row that ends at a hard newline includes
/// the newline in its span; `length` never counts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLine {
    /// First character position.
    pub start: usize,
    /// One past the last character position.
    pub end: usize,
    /// Number of displayed characters.
    pub length: usize,
    /// Display width in cells.
    pub width: u32,
}

impl ScreenLine {
    /// True if this row is terminated by a literal newline.
    pub fn has_newline(&self) -> bool {
        self.end > self.start + self.length
    }

    /// Shift the span by `delta` positions.
    pub(crate) fn shifted(&self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
            ..*self
        }
    }

    /// The empty row placed after a trailing newline, or in an empty buffer.
    pub(crate) fn empty_at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
            length: 0,
            width: 0,
        }
    }
}

/// Compute the row beginning at `start`, which must be inside the text.
///
/// Width accumulates character by character. The row breaks before the first
/// character that would overflow `max_width`, backing up to the most recent
/// blank-to-word transition if there was one. A newline ends the row. A
/// character too wide to fit on an empty row is placed on its own.
pub fn screen_line(text: &GapBuffer, start: usize, max_width: u32, tab_stop: u32) -> ScreenLine {
    scan(text, start, max_width, tab_stop).0
}

/// The last position examined while computing the row at `start`. A row is
/// unaffected by edits that begin after this position. Rows ending at the
/// text end report the text length.
pub(crate) fn reach(text: &GapBuffer, start: usize, max_width: u32, tab_stop: u32) -> usize {
    scan(text, start, max_width, tab_stop).1
}

/// Shared row scanner, returning the row and its reach.
fn scan(text: &GapBuffer, start: usize, max_width: u32, tab_stop: u32) -> (ScreenLine, usize) {
    let len = text.len();
    let mut cur = start;
    let mut width = 0u32;
    let mut word_break: Option<(usize, u32)> = None;
    let mut blank = false;

    let row = |end: usize, width: u32| ScreenLine {
        start,
        end,
        length: end - start,
        width,
    };

    while cur < len {
        let Some(ch) = text.get(cur) else {
            break;
        };
        if ch == '\n' {
            let line = ScreenLine {
                start,
                end: cur + 1,
                length: cur - start,
                width,
            };
            return (line, cur);
        }
        let w = char_width(ch, width, tab_stop);
        let is_blank = is_blank(ch);
        if blank && !is_blank {
            word_break = Some((cur, width));
        }
        if width + w > max_width {
            if let Some((at, at_width)) = word_break {
                return (row(at, at_width), cur);
            }
            if cur == start {
                return (row(cur + 1, w), cur);
            }
            return (row(cur, width), cur);
        }
        width += w;
        blank = is_blank;
        cur += 1;
    }
    (row(len, width), len)
}

/// Wrap the whole text into rows. A text that is empty or ends in a newline
/// gets a final empty row for the cursor to sit on. A zero width produces no
/// rows at all.
pub fn wrap(text: &GapBuffer, max_width: u32, tab_stop: u32) -> Vec<ScreenLine> {
    let mut out = Vec::new();
    if max_width == 0 {
        return out;
    }
    wrap_from(text, 0, max_width, tab_stop, &mut out);
    push_tail(text, &mut out);
    out
}

/// Append rows from `pos` to the end of the text.
pub(crate) fn wrap_from(
    text: &GapBuffer,
    mut pos: usize,
    max_width: u32,
    tab_stop: u32,
    out: &mut Vec<ScreenLine>,
) {
    while pos < text.len() {
        let line = screen_line(text, pos, max_width, tab_stop);
        pos = line.end;
        out.push(line);
    }
}

/// Append the trailing empty row if the text calls for one.
pub(crate) fn push_tail(text: &GapBuffer, out: &mut Vec<ScreenLine>) {
    let len = text.len();
    if len == 0 || text.get(len - 1) == Some('\n') {
        out.push(ScreenLine::empty_at(len));
    }
}
