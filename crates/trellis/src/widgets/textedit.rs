//! Multi-line text editing widget.

use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};

use crate::{
    Context,
    core::{signal::Signal, text},
    editor::{DEFAULT_GAP_SIZE, DeleteExtent, Direction, Granularity, TextBuffer},
    error::Result,
    geom::{Expanse, Line, Point},
    keymap,
    render::Render,
    state::NodeName,
    widget::{DrawContext, EventOutcome, Widget},
};

/// Character classes a text edit accepts from typed input. The default
/// accepts everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputFilter {
    /// Accept letters. Setting only `numeric` rejects them.
    pub alphabetic: bool,
    /// Accept digits. Setting only `alphabetic` rejects them.
    pub numeric: bool,
    /// Reject whitespace.
    pub no_space: bool,
    /// Reject punctuation and symbols.
    pub no_punctuation: bool,
}

impl InputFilter {
    /// Does the filter let `c` through?
    pub fn accepts(&self, c: char) -> bool {
        if c.is_alphabetic() {
            self.alphabetic || !self.numeric
        } else if c.is_numeric() {
            self.numeric || !self.alphabetic
        } else if c.is_whitespace() {
            !self.no_space
        } else if c.is_control() {
            true
        } else {
            !self.no_punctuation
        }
    }
}

/// An editable, wrapped text area.
///
/// The text is wrapped one cell short of the real width so the cursor always
/// has a cell to sit in at the end of a full row. The view scrolls to keep the
/// cursor row visible.
#[derive(Debug)]
pub struct TextEdit {
    /// The text and its row cache.
    buffer: TextBuffer,
    /// First row shown.
    view_top: usize,
    /// Rows available.
    height: u32,
    /// Accept edits.
    editable: bool,
    /// Typed characters replace the one under the cursor.
    overwrite: bool,
    /// Typed input filter.
    filter: InputFilter,
    /// Fired with the full text after every change.
    text_changed: Signal<String>,
}

impl Default for TextEdit {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextEdit {
    /// A text edit holding `text`, with the cursor at the end.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_gap(text, DEFAULT_GAP_SIZE),
            view_top: 0,
            height: 0,
            editable: true,
            overwrite: false,
            filter: InputFilter::default(),
            text_changed: Signal::new(),
        }
    }

    /// Builder-style tab stop.
    pub fn with_tab_stop(mut self, tab_stop: u32) -> Self {
        self.buffer.set_tab_stop(tab_stop);
        self
    }

    /// Builder-style gap growth slack.
    pub fn with_gap_size(mut self, gap_size: usize) -> Self {
        let text = self.buffer.get_text();
        let cursor = self.buffer.cursor();
        let tab_stop = self.buffer.tab_stop();
        let width = self.buffer.width();
        self.buffer = TextBuffer::with_gap(&text, gap_size).wrapped(width);
        self.buffer.set_tab_stop(tab_stop);
        self.buffer.set_cursor(cursor);
        self
    }

    /// Builder-style input filter.
    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builder-style read-only switch.
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// The full text.
    pub fn text(&mut self) -> String {
        self.buffer.get_text()
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.scroll_to_cursor();
        self.changed();
    }

    /// Direct access to the underlying buffer.
    pub fn buffer(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Is editing allowed?
    pub fn editable(&self) -> bool {
        self.editable
    }

    /// Allow or refuse edits.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Is overwrite mode on?
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Flip between insert and overwrite mode.
    pub fn toggle_overwrite(&mut self) {
        self.overwrite = !self.overwrite;
    }

    /// The input filter.
    pub fn filter(&self) -> InputFilter {
        self.filter
    }

    /// Replace the input filter.
    pub fn set_filter(&mut self, filter: InputFilter) {
        self.filter = filter;
    }

    /// First row shown.
    pub fn view_top(&self) -> usize {
        self.view_top
    }

    /// Subscribe to text changes.
    pub fn subscribe(&mut self) -> Receiver<String> {
        self.text_changed.subscribe()
    }

    /// Insert text at the cursor, honouring overwrite mode. The filter is not
    /// applied.
    pub fn insert(&mut self, s: &str) {
        if self.overwrite {
            for c in s.chars() {
                if self.buffer.char_at(self.buffer.cursor()).is_some_and(|c| c != '\n') {
                    self.buffer.delete(Direction::Forward, DeleteExtent::Char);
                }
                let mut b = [0; 4];
                self.buffer.insert(c.encode_utf8(&mut b));
            }
        } else {
            self.buffer.insert(s);
        }
        self.scroll_to_cursor();
        self.changed();
    }

    /// Broadcast the current text.
    fn changed(&mut self) {
        if self.text_changed.subscribers() > 0 {
            let text = self.buffer.get_text();
            self.text_changed.emit(text);
        }
    }

    /// Scroll the view so the cursor row is visible.
    fn scroll_to_cursor(&mut self) {
        let Some(pos) = self.buffer.cursor_position() else {
            self.view_top = 0;
            return;
        };
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if pos.row < self.view_top {
            self.view_top = pos.row;
        } else if pos.row >= self.view_top + height {
            self.view_top = pos.row + 1 - height;
        }
    }

    /// Move the cursor. Returns `true` if it moved.
    fn motion(&mut self, granularity: Granularity, direction: Direction) -> bool {
        let before = self.buffer.cursor();
        self.buffer.move_cursor(granularity, direction);
        self.scroll_to_cursor();
        self.buffer.cursor() != before
    }

    /// Delete next to the cursor. Returns `true` if anything was removed.
    fn erase(&mut self, direction: Direction, extent: DeleteExtent) -> bool {
        if self.buffer.delete(direction, extent) == 0 {
            return false;
        }
        self.scroll_to_cursor();
        self.changed();
        true
    }

    /// A row with tabs expanded to spaces.
    fn display_row(&mut self, row: usize) -> Option<String> {
        let raw = self.buffer.line_text(row)?;
        let tab_stop = self.buffer.tab_stop();
        let mut out = String::with_capacity(raw.len());
        let mut col = 0;
        for c in raw.chars() {
            let w = text::char_width(c, col, tab_stop);
            if c == '\t' {
                out.extend((0..w).map(|_| ' '));
            } else {
                out.push(c);
            }
            col += w;
        }
        Some(out)
    }
}

impl Widget for TextEdit {
    fn area_updated(&mut self, size: Expanse) {
        self.buffer.set_width(size.w.saturating_sub(1));
        self.height = size.h;
        self.scroll_to_cursor();
    }

    fn render(&mut self, r: &mut Render, ctx: &DrawContext) -> Result<()> {
        let area = r.area();
        r.fill("textedit", area, ' ')?;
        for y in 0..ctx.size.h {
            let Some(row) = self.display_row(self.view_top + y as usize) else {
                break;
            };
            r.text("textedit", Line::new(0, y, ctx.size.w), &row)?;
        }
        if ctx.focused
            && let Some(pos) = self.buffer.cursor_position()
            && pos.row >= self.view_top
        {
            let under = self
                .buffer
                .char_at(self.buffer.cursor())
                .filter(|c| !c.is_whitespace())
                .unwrap_or(' ');
            let at = Point {
                x: pos.column,
                y: (pos.row - self.view_top) as u32,
            };
            r.put("textedit/cursor", at, under)?;
        }
        Ok(())
    }

    fn on_action(&mut self, action: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        use DeleteExtent as D;
        use Direction::{Backward, Forward};
        use Granularity as G;

        let moved = |m: bool| {
            if m {
                EventOutcome::Handle
            } else {
                EventOutcome::Consume
            }
        };
        let outcome = match action {
            "cursor-right" => moved(self.motion(G::Char, Forward)),
            "cursor-left" => moved(self.motion(G::Char, Backward)),
            "cursor-right-word" => moved(self.motion(G::Word, Forward)),
            "cursor-left-word" => moved(self.motion(G::Word, Backward)),
            "cursor-end" => moved(self.motion(G::DisplayLineEnd, Forward)),
            "cursor-begin" => moved(self.motion(G::DisplayLineEnd, Backward)),
            // Unmoved vertical motion bubbles so the key can move focus.
            "cursor-down" if self.motion(G::DisplayLine, Forward) => EventOutcome::Handle,
            "cursor-up" if self.motion(G::DisplayLine, Backward) => EventOutcome::Handle,
            "toggle-overwrite" => {
                self.toggle_overwrite();
                EventOutcome::Handle
            }
            _ if !self.editable => EventOutcome::Ignore,
            "delete-char" => moved(self.erase(Forward, D::Char)),
            "backspace" => moved(self.erase(Backward, D::Char)),
            "delete-word-end" => moved(self.erase(Forward, D::Word)),
            "delete-word-begin" => moved(self.erase(Backward, D::Word)),
            "delete-line-end" => moved(self.erase(Forward, D::LineEnd)),
            "newline" => {
                self.buffer.insert("\n");
                self.scroll_to_cursor();
                self.changed();
                EventOutcome::Handle
            }
            _ => EventOutcome::Ignore,
        };
        Ok(outcome)
    }

    fn on_text(&mut self, s: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        if !self.editable {
            return Ok(EventOutcome::Ignore);
        }
        let accepted: String = s.chars().filter(|c| self.filter.accepts(*c)).collect();
        if accepted.is_empty() {
            return Ok(EventOutcome::Ignore);
        }
        self.insert(&accepted);
        Ok(EventOutcome::Handle)
    }

    fn accept_focus(&self) -> bool {
        true
    }

    fn contexts(&self) -> &'static [&'static str] {
        &[keymap::TEXTENTRY]
    }

    fn name(&self) -> NodeName {
        NodeName::convert("textedit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TypedId,
        compositor::{Compositor, WindowConfig, WindowManager},
        core::{node::NodeConfig, world::Core},
        focus::FocusManager,
        style::StyleMap,
        testing::BufTest,
        widgets::Window,
    };

    /// A core holding one window that is filled by a text edit.
    fn setup(text: &str, w: u32, h: u32) -> Result<(Core, TypedId<TextEdit>)> {
        let mut core = Core::new();
        core.resize(Expanse::new(w, h));
        let win = core.add_window(Window::new(), WindowConfig::new())?;
        let id = core.add(TextEdit::new(text), NodeConfig::new());
        core.attach(win, id)?;
        Ok((core, id))
    }

    fn act(core: &mut Core, id: TypedId<TextEdit>, action: &str) -> Result<EventOutcome> {
        core.with_widget(id, |t, ctx| t.on_action(action, ctx))?
    }

    #[test]
    fn filter_classes() {
        let all = InputFilter::default();
        assert!("a1 ,\t".chars().all(|c| all.accepts(c)));
        let digits = InputFilter {
            numeric: true,
            ..Default::default()
        };
        assert!(digits.accepts('7'));
        assert!(!digits.accepts('x'));
        assert!(digits.accepts(' '));
        let word = InputFilter {
            alphabetic: true,
            no_space: true,
            no_punctuation: true,
            ..Default::default()
        };
        assert!(word.accepts('é'));
        assert!(!word.accepts('1'));
        assert!(!word.accepts(' '));
        assert!(!word.accepts('-'));
    }

    #[test]
    fn typing_and_signal() -> Result<()> {
        let (mut core, id) = setup("", 6, 2)?;
        let rx = core.with_widget(id, |t, _| t.subscribe())?;
        core.with_widget(id, |t, ctx| t.on_text("hi", ctx))??;
        assert_eq!(act(&mut core, id, "backspace")?, EventOutcome::Handle);
        let digits = InputFilter {
            numeric: true,
            ..Default::default()
        };
        core.with_widget(id, |t, _| t.set_filter(digits))?;
        let out = core.with_widget(id, |t, ctx| t.on_text("x", ctx))??;
        assert_eq!(out, EventOutcome::Ignore);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["hi", "h"]);
        Ok(())
    }

    #[test]
    fn overwrite_mode() -> Result<()> {
        let (mut core, id) = setup("abc\nd", 10, 3)?;
        core.with_widget(id, |t, ctx| {
            t.buffer().set_cursor(1);
            t.toggle_overwrite();
            t.on_text("XYZ", ctx)
        })??;
        assert_eq!(core.with_widget(id, |t, _| t.text())?, "aXYZ\nd");
        Ok(())
    }

    #[test]
    fn read_only_refuses_edits() -> Result<()> {
        let (mut core, id) = setup("abc", 10, 3)?;
        core.with_widget(id, |t, _| t.set_editable(false))?;
        assert_eq!(act(&mut core, id, "backspace")?, EventOutcome::Ignore);
        assert_eq!(act(&mut core, id, "cursor-left")?, EventOutcome::Handle);
        let out = core.with_widget(id, |t, ctx| t.on_text("z", ctx))??;
        assert_eq!(out, EventOutcome::Ignore);
        assert_eq!(core.with_widget(id, |t, _| t.text())?, "abc");
        Ok(())
    }

    #[test]
    fn vertical_motion_bubbles_at_edges() -> Result<()> {
        let (mut core, id) = setup("ab\ncd", 10, 3)?;
        assert_eq!(act(&mut core, id, "cursor-down")?, EventOutcome::Ignore);
        assert_eq!(act(&mut core, id, "cursor-up")?, EventOutcome::Handle);
        assert_eq!(act(&mut core, id, "cursor-up")?, EventOutcome::Ignore);
        assert_eq!(act(&mut core, id, "cursor-begin")?, EventOutcome::Handle);
        assert_eq!(act(&mut core, id, "cursor-left")?, EventOutcome::Consume);
        Ok(())
    }

    #[test]
    fn view_follows_cursor() -> Result<()> {
        let (mut core, id) = setup("", 4, 2)?;
        core.with_widget(id, |t, ctx| t.on_text("a\nb\nc\nd", ctx))??;
        assert_eq!(core.widget(id).map(TextEdit::view_top), Some(2));
        core.grab_focus(id.id())?;

        let mut c = Compositor::new(16, '+');
        let frame = c.compose(&mut core, &StyleMap::new());
        BufTest::new(&frame).assert_matches(&["c   ", "d   "]);

        act(&mut core, id, "cursor-begin")?;
        for _ in 0..3 {
            act(&mut core, id, "cursor-up")?;
        }
        assert_eq!(core.widget(id).map(TextEdit::view_top), Some(0));
        Ok(())
    }

    #[test]
    fn wraps_one_short_of_width() -> Result<()> {
        let (mut core, id) = setup("abcdef", 4, 3)?;
        let rows = core.with_widget(id, |t, _| {
            (0..3).filter_map(|r| t.display_row(r)).collect::<Vec<_>>()
        })?;
        assert_eq!(rows, vec!["abc", "def"]);
        Ok(())
    }

    #[test]
    fn tabs_expand() -> Result<()> {
        let (mut core, id) = setup("a\tb", 10, 1)?;
        let row = core.with_widget(id, |t, _| t.display_row(0))?;
        assert_eq!(row.as_deref(), Some("a       b"));
        Ok(())
    }
}
