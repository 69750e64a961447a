//! Widget trait and event outcome types.

use std::any::{Any, type_name};

use crate::{
    Context, NodeId,
    error::Result,
    geom::Expanse,
    geometry::SizeRequest,
    render::Render,
    state::NodeName,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was processed without a state change and propagation stops.
    Consume,
    /// The event was not handled and will bubble up the tree.
    Ignore,
}

/// Read-only facts about the node being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawContext {
    /// The node being drawn.
    pub node: NodeId,
    /// The node's real size.
    pub size: Expanse,
    /// Does the node hold terminal focus?
    pub focused: bool,
    /// Border reserved around a container's children, zero for leaves.
    pub border: u32,
}

/// Widgets are the behavior attached to nodes in the Core arena.
///
/// A widget never sets its own real size. It states a wish through
/// [`Widget::wish`], which the core re-reads after each of the widget's
/// callbacks, and learns its real size through [`Widget::area_updated`].
pub trait Widget: Any + Send {
    /// The size this widget would like given its content.
    fn wish(&self) -> SizeRequest {
        SizeRequest::AUTO
    }

    /// Called whenever the real size assigned by the parent changes.
    fn area_updated(&mut self, _size: Expanse) {}

    /// Render this widget's own content. Does not render children.
    fn render(&mut self, _r: &mut Render, _ctx: &DrawContext) -> Result<()> {
        Ok(())
    }

    /// Handle a bound action.
    fn on_action(&mut self, _action: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Handle a fragment of text typed while this widget is focused.
    fn on_text(&mut self, _text: &str, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Called exactly once when the widget first becomes part of a live
    /// tree, before the first render.
    fn on_mount(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Does this widget take focus regardless of its node configuration?
    fn accept_focus(&self) -> bool {
        false
    }

    /// Key-binding contexts this widget answers to, most specific first.
    fn contexts(&self) -> &'static [&'static str] {
        &[]
    }

    /// Name used for logging and debugging.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
