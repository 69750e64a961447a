use super::{
    compositor::WindowManager,
    focus::{FocusDirection, FocusManager},
    id::NodeId,
    world::{Core, Redraw},
};
use crate::{error::Result, geom::Expanse};

/// Mutable access to the tree, handed to widgets while they handle events.
///
/// Every operation is relative to the node whose widget is running. The
/// widget itself is out of the arena for the duration of the call, so the
/// tree may be changed freely, including destroying the node.
pub trait Context {
    /// The node whose widget is running.
    fn node_id(&self) -> NodeId;

    /// The node's real size, or zero if it has been destroyed.
    fn size(&self) -> Expanse;

    /// Does the node hold terminal focus?
    fn has_focus(&self) -> bool;

    /// Ask for the screen to be repainted.
    fn redraw(&mut self);

    /// Move focus within this node's window.
    fn move_focus(&mut self, dir: FocusDirection) -> Result<bool>;

    /// Take focus for this node.
    fn grab_focus(&mut self) -> Result<bool>;

    /// Show or hide a node.
    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<()>;

    /// Destroy a node and its subtree.
    fn remove(&mut self, node: NodeId) -> Result<()>;

    /// Close the window containing this node.
    fn close_window(&mut self) -> Result<()>;

    /// Direct access to the arena.
    fn core(&mut self) -> &mut Core;
}

/// The [`Context`] used by the core for widget callbacks.
pub struct CoreContext<'a> {
    /// The arena.
    core: &'a mut Core,
    /// The node whose widget is running.
    node: NodeId,
}

impl<'a> CoreContext<'a> {
    /// A context for `node`.
    pub(crate) fn new(core: &'a mut Core, node: NodeId) -> Self {
        Self { core, node }
    }
}

impl Context for CoreContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn size(&self) -> Expanse {
        self.core
            .real(self.node)
            .map(|r| r.expanse())
            .unwrap_or_default()
    }

    fn has_focus(&self) -> bool {
        self.core.node(self.node).is_some_and(|n| n.has_focus())
    }

    fn redraw(&mut self) {
        self.core.request_redraw(Redraw::Incremental);
    }

    fn move_focus(&mut self, dir: FocusDirection) -> Result<bool> {
        self.core.move_focus(self.node, dir)
    }

    fn grab_focus(&mut self) -> Result<bool> {
        self.core.grab_focus(self.node)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<()> {
        self.core.set_visible(node, visible)
    }

    fn remove(&mut self, node: NodeId) -> Result<()> {
        self.core.remove(node)
    }

    fn close_window(&mut self) -> Result<()> {
        let root = self.core.root_of(self.node);
        self.core.close_window(root)
    }

    fn core(&mut self) -> &mut Core {
        self.core
    }
}
