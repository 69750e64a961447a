//! Label widget.

use crate::{
    core::text,
    error::Result,
    geom::Line,
    geometry::SizeRequest,
    render::Render,
    widget::{DrawContext, Widget},
};

/// Static, possibly multi-line, text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// The text, split at newlines when drawn.
    text: String,
}

impl Label {
    /// Construct a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label text. The label's wish follows the new text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn wish(&self) -> SizeRequest {
        let width = self
            .text
            .lines()
            .map(|l| text::str_width(l, text::DEFAULT_TAB_STOP))
            .max()
            .unwrap_or(0);
        let height = self.text.lines().count().max(1) as u32;
        SizeRequest::fixed(width, height)
    }

    fn render(&mut self, r: &mut Render, ctx: &DrawContext) -> Result<()> {
        for (y, line) in self.text.lines().enumerate().take(ctx.size.h as usize) {
            r.text("label", Line::new(0, y as u32, ctx.size.w), line)?;
        }
        Ok(())
    }
}
