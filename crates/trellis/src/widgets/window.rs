//! Window root widget.

use crate::{
    core::text,
    error::Result,
    geom::Line,
    render::Render,
    state::NodeName,
    widget::{DrawContext, Widget},
};

/// The root container of a window. It blanks its area so windows below do
/// not show through, and draws a border with an optional title when its node
/// reserves one.
#[derive(Debug, Clone, Default)]
pub struct Window {
    /// Title drawn into the top border.
    title: Option<String>,
}

impl Window {
    /// An untitled window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Widget for Window {
    fn render(&mut self, r: &mut Render, ctx: &DrawContext) -> Result<()> {
        let area = r.area();
        r.fill("window", area, ' ')?;
        if ctx.border == 0 {
            return Ok(());
        }
        r.border("window/border", area)?;
        if let Some(title) = &self.title
            && ctx.size.w > 4
        {
            let w = text::str_width(title, text::DEFAULT_TAB_STOP).min(ctx.size.w - 4);
            r.text("window/title", Line::new(2, 0, w), title)?;
        }
        Ok(())
    }

    fn name(&self) -> NodeName {
        NodeName::convert("window")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buf,
        compositor::{Compositor, WindowConfig, WindowManager},
        core::{node::ContainerConfig, world::Core},
        geom::Expanse,
        style::StyleMap,
        testing::BufTest,
    };

    #[test]
    fn border_and_title() -> Result<()> {
        let mut core = Core::new();
        core.resize(Expanse::new(8, 3));
        core.add_window(
            Window::new().with_title("hi"),
            WindowConfig::new().container(ContainerConfig::new().border(1)),
        )?;
        let mut c = Compositor::new(16, '+');
        let frame = c.compose(&mut core, &StyleMap::new());
        BufTest::new(&frame).assert_matches(buf!["+─hi───┐" "│      │" "└──────┘"]);
        Ok(())
    }
}
