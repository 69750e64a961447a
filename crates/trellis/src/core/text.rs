use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default distance between tab stops, in cells.
pub const DEFAULT_TAB_STOP: u32 = 8;

/// First code point of the Unicode "Control Pictures" block.
const CONTROL_PICTURES: u32 = 0x2400;

/// The glyph drawn for a character. C0 control characters and DEL are
/// replaced by their printable control pictures.
pub fn display_char(ch: char) -> char {
    match ch as u32 {
        c @ 0..0x20 => char::from_u32(CONTROL_PICTURES + c).unwrap_or(ch),
        0x7f => '\u{2421}',
        _ => ch,
    }
}

/// Width of a tab starting at `column`.
pub fn tab_width(column: u32, tab_stop: u32) -> u32 {
    let tab_stop = tab_stop.max(1);
    tab_stop - column % tab_stop
}

/// On-screen width of `ch` when it starts at `column`.
///
/// Tabs run to the next tab stop, a newline takes no space, substituted
/// control characters take one cell and everything else takes its Unicode
/// width, so combining marks are zero and wide characters are two.
pub fn char_width(ch: char, column: u32, tab_stop: u32) -> u32 {
    match ch {
        '\t' => tab_width(column, tab_stop),
        '\n' => 0,
        c if c.is_control() => 1,
        c => c.width().unwrap_or(0).min(2) as u32,
    }
}

/// Width of a string laid out from column zero.
pub fn str_width(s: &str, tab_stop: u32) -> u32 {
    s.chars()
        .fold(0, |col, ch| col + char_width(ch, col, tab_stop))
}

/// Width of a grapheme cluster, clamped to terminal cell widths.
pub fn grapheme_width(grapheme: &str) -> u32 {
    if grapheme.is_empty() {
        return 0;
    }
    UnicodeWidthStr::width(grapheme).clamp(1, 2) as u32
}

/// Blank characters separate words when wrapping. A newline is a hard break,
/// not a blank.
pub fn is_blank(ch: char) -> bool {
    ch != '\n' && ch.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(char_width('a', 0, 8), 1);
        assert_eq!(char_width('界', 0, 8), 2);
        assert_eq!(char_width('\u{0301}', 3, 8), 0);
        assert_eq!(char_width('\n', 3, 8), 0);
        assert_eq!(char_width('\u{1b}', 3, 8), 1);
        assert_eq!(str_width("a界b", 8), 4);
    }

    #[test]
    fn tabs_run_to_stop() {
        assert_eq!(tab_width(0, 8), 8);
        assert_eq!(tab_width(3, 8), 5);
        assert_eq!(tab_width(8, 8), 8);
        assert_eq!(tab_width(5, 0), 1);
        assert_eq!(str_width("ab\tc", 4), 5);
    }

    #[test]
    fn control_pictures() {
        assert_eq!(display_char('\u{1}'), '\u{2401}');
        assert_eq!(display_char('\u{7f}'), '\u{2421}');
        assert_eq!(display_char('x'), 'x');
    }

    #[test]
    fn blanks() {
        assert!(is_blank(' '));
        assert!(is_blank('\t'));
        assert!(!is_blank('\n'));
        assert!(!is_blank('a'));
    }
}
