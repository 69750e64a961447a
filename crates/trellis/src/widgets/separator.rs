//! Separator widget.

use crate::{
    error::Result,
    geom::Line,
    geometry::{Extent, SizeRequest},
    render::Render,
    widget::{DrawContext, Widget},
};

/// A one-row horizontal rule spanning whatever width it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Separator;

impl Widget for Separator {
    fn wish(&self) -> SizeRequest {
        SizeRequest::new(Extent::Auto, 1)
    }

    fn render(&mut self, r: &mut Render, ctx: &DrawContext) -> Result<()> {
        r.hline("separator", Line::new(0, 0, ctx.size.w))
    }
}
