use std::{any::Any, mem};

use slotmap::SlotMap;

use crate::{
    Context,
    core::{
        compositor::{WindowEntry, WindowManager},
        context::CoreContext,
        focus::FocusManager,
        id::{NodeId, TypedId},
        node::{ContainerConfig, ContainerState, Node, NodeConfig, NodeKind},
    },
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
    geometry::{Arrangement, Extent, SizeRequest, stack, stack_wish},
    widget::{EventOutcome, Widget},
};

/// Pending repaint work, coalesced between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Redraw {
    /// Nothing changed.
    #[default]
    None,
    /// Diff against the previous frame.
    Incremental,
    /// Clear the terminal and repaint everything.
    Full,
}

/// The widget arena: every node, the window registry and pending redraw
/// state.
///
/// Structure is tree-shaped and single-owner. A node is created detached,
/// becomes live when attached to a container or registered as a window, and
/// is destroyed with its whole subtree by [`Core::remove`]. Real geometry is
/// only ever written by the layout pass of the parent.
pub struct Core {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Window registry, oldest first.
    pub(crate) windows: Vec<WindowEntry>,
    /// The window holding terminal focus.
    pub(crate) active: Option<NodeId>,
    /// Physical screen size.
    pub(crate) screen: Expanse,
    /// Pending repaint.
    pub(crate) redraw: Redraw,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            windows: Vec::new(),
            active: None,
            screen: Expanse::default(),
            redraw: Redraw::None,
        }
    }

    /// Add a detached leaf node.
    pub fn add<W: Widget>(&mut self, widget: W, cfg: NodeConfig) -> TypedId<W> {
        let node = Node::new(widget.into(), &cfg, NodeKind::Leaf);
        TypedId::new(self.nodes.insert(node))
    }

    /// Add a detached container node.
    pub fn add_container<W: Widget>(&mut self, widget: W, cfg: ContainerConfig) -> TypedId<W> {
        let state = ContainerState::new(&cfg);
        let node = Node::new(widget.into(), &cfg.node, NodeKind::Container(Box::new(state)));
        let id = self.nodes.insert(node);
        self.refresh_wish(id);
        TypedId::new(id)
    }

    /// Does the node exist?
    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Node data.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// The node's parent.
    pub fn parent(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.nodes.get(id.into()).and_then(Node::parent)
    }

    /// The node's children, in order.
    pub fn children(&self, id: impl Into<NodeId>) -> &[NodeId] {
        self.nodes.get(id.into()).map_or(&[], Node::children)
    }

    /// The root of the tree containing `id`.
    pub fn root_of(&self, id: impl Into<NodeId>) -> NodeId {
        let mut cur = id.into();
        while let Some(p) = self.parent(cur) {
            cur = p;
        }
        cur
    }

    /// Is `ancestor` equal to `id` or above it in the tree?
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Effective visibility: the node and all its ancestors are visible.
    pub fn is_visible(&self, id: impl Into<NodeId>) -> bool {
        let mut cur = Some(id.into());
        while let Some(c) = cur {
            match self.nodes.get(c) {
                Some(n) if n.visible => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    /// Real rectangle of a node, relative to its parent's content origin.
    pub fn real(&self, id: impl Into<NodeId>) -> Option<Rect> {
        self.nodes.get(id.into()).map(|n| n.geom.real)
    }

    /// Physical screen size.
    pub fn screen(&self) -> Expanse {
        self.screen
    }

    /// Attach a detached node as the last child of a container.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        let p = self.nodes.get(parent).ok_or(Error::NodeNotFound(parent))?;
        if !p.is_container() {
            return Err(Error::NotAContainer(parent));
        }
        let c = self.nodes.get(child).ok_or(Error::NodeNotFound(child))?;
        if c.parent.is_some() || self.is_window(child) {
            return Err(Error::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.clean_focus(child);
        if let Some(state) = self.nodes[child].container_mut() {
            state.chain = None;
        }
        self.nodes[child].parent = Some(parent);
        if let Some(state) = self.nodes[parent].container_mut() {
            state.children.push(child);
        }
        self.invalidate_chain(parent);
        self.mount(child)?;
        self.refresh_wish(parent);
        self.relayout(parent);
        self.request_redraw(Redraw::Incremental);
        debug_assert!(self.check_tree());
        Ok(())
    }

    /// Detach a node from its parent, keeping it and its subtree alive as a
    /// free-standing tree. Detaching a root is a no-op.
    pub fn detach(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        if let Some(parent) = node.parent {
            self.unlink(id, parent);
        }
        debug_assert!(self.check_tree());
        Ok(())
    }

    /// Destroy a node and its whole subtree. Registered windows are
    /// unregistered.
    pub fn remove(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        if let Some(parent) = node.parent {
            self.unlink(id, parent);
        }
        let doomed = self.subtree(id);
        let was_window = self.is_window(id);
        self.windows.retain(|w| w.id != id);
        for n in doomed.iter().rev() {
            self.nodes.remove(*n);
        }
        if was_window {
            if self.active == Some(id) {
                self.active = None;
            }
            tracing::debug!(window = ?id, "window removed");
            self.focus_window();
        }
        self.request_redraw(Redraw::Incremental);
        debug_assert!(self.check_tree());
        Ok(())
    }

    /// Unlink `id` from `parent`, cleaning the focus path if it ran through
    /// `id`.
    fn unlink(&mut self, id: NodeId, parent: NodeId) {
        let root = self.root_of(parent);
        if self
            .focused_widget(root)
            .is_some_and(|f| self.is_ancestor(id, f))
        {
            self.clean_focus(root);
        }
        if let Some(state) = self.nodes.get_mut(parent).and_then(Node::container_mut) {
            state.children.retain(|c| *c != id);
            if state.focus_child == Some(id) {
                state.focus_child = None;
            }
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = None;
        }
        self.invalidate_chain(parent);
        self.refresh_wish(parent);
        self.relayout(parent);
        self.request_redraw(Redraw::Incremental);
    }

    /// All nodes under `id`, including `id`, in pre-order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if !self.nodes.contains_key(n) {
                continue;
            }
            out.push(n);
            stack.extend(self.children(n).iter().rev());
        }
        out
    }

    /// Show or hide a node. Focus is not repaired here; the next focus move
    /// or key dispatch does that.
    pub fn set_visible(&mut self, id: impl Into<NodeId>, visible: bool) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        self.invalidate_chain(id);
        self.request_changed(id);
        if self.is_window(id) {
            self.focus_window();
        }
        self.request_redraw(Redraw::Incremental);
        Ok(())
    }

    /// Allow or forbid a node to take focus.
    pub fn set_can_focus(&mut self, id: impl Into<NodeId>, can_focus: bool) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.can_focus != can_focus {
            node.can_focus = can_focus;
            self.invalidate_chain(id);
        }
        Ok(())
    }

    /// Change a node's requested size.
    pub fn set_size(&mut self, id: impl Into<NodeId>, request: SizeRequest) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.geom.request != request {
            node.geom.request = request;
            self.request_changed(id);
        }
        Ok(())
    }

    /// Change a node's requested position inside its parent.
    pub fn set_position(&mut self, id: impl Into<NodeId>, pos: Option<Point>) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.geom.pos != pos {
            node.geom.pos = pos;
            self.request_changed(id);
        }
        Ok(())
    }

    /// Give a free-standing root its size and lay out its subtree. Windows
    /// are sized by the compositor instead.
    pub fn layout_root(&mut self, root: impl Into<NodeId>, size: Expanse) {
        let root = root.into();
        if self.parent(root).is_none() {
            self.set_real(root, size.rect());
        }
    }

    /// Mark the focus chain of the tree containing `id` stale.
    pub(crate) fn invalidate_chain(&mut self, id: NodeId) {
        let root = self.root_of(id);
        if let Some(state) = self.nodes.get_mut(root).and_then(Node::container_mut) {
            state.chain = None;
        }
    }

    /// Record a redraw request. Requests coalesce: the strongest wins.
    pub fn request_redraw(&mut self, redraw: Redraw) {
        self.redraw = self.redraw.max(redraw);
    }

    /// Take the pending redraw request, leaving none.
    pub(crate) fn take_redraw(&mut self) -> Redraw {
        mem::take(&mut self.redraw)
    }

    /// The pending redraw request.
    pub fn pending_redraw(&self) -> Redraw {
        self.redraw
    }

    /// Is `root` a free-standing tree or the active window?
    pub(crate) fn is_active_root(&self, root: NodeId) -> bool {
        !self.is_window(root) || self.active == Some(root)
    }

    /// Run `on_mount` for every unmounted node under `id`.
    pub(crate) fn mount(&mut self, id: NodeId) -> Result<()> {
        for n in self.subtree(id) {
            let fresh = self.nodes.get_mut(n).is_some_and(|node| !node.mounted);
            if !fresh {
                continue;
            }
            self.nodes[n].mounted = true;
            self.with_widget_mut(n, |w, core| {
                let mut ctx = CoreContext::new(core, n);
                w.on_mount(&mut ctx)
            })??;
            self.refresh_wish(n);
        }
        Ok(())
    }

    /// Recompute a node's wish size and propagate a change to the parent.
    pub(crate) fn refresh_wish(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let stacked = node.container().and_then(|c| match c.arrangement {
            Arrangement::Free => None,
            Arrangement::Vertical => Some((true, c.border)),
            Arrangement::Horizontal => Some((false, c.border)),
        });
        let wish = match stacked {
            Some((vertical, border)) => {
                let requests = self.visible_requests(id);
                let wish = stack_wish(&requests, vertical);
                let pad = |e: Extent| match e {
                    Extent::Cells(n) => Extent::Cells(n + 2 * border),
                    Extent::Auto => Extent::Auto,
                };
                SizeRequest {
                    w: pad(wish.w),
                    h: pad(wish.h),
                }
            }
            None => match &node.widget {
                Some(w) => w.wish(),
                None => return,
            },
        };
        if self.nodes[id].geom.wish != wish {
            self.nodes[id].geom.wish = wish;
            self.request_changed(id);
        }
    }

    /// Effective requests of the visible children of a container.
    fn visible_requests(&self, id: NodeId) -> Vec<SizeRequest> {
        self.children(id)
            .iter()
            .filter_map(|c| self.nodes.get(*c))
            .filter(|n| n.visible)
            .map(|n| n.geom.effective())
            .collect()
    }

    /// A node's request, wish or visibility changed: renegotiate its place.
    fn request_changed(&mut self, id: NodeId) {
        match self.parent(id) {
            Some(parent) => {
                self.refresh_wish(parent);
                self.relayout(parent);
            }
            None if self.is_window(id) => self.update_window_area(id),
            None => {}
        }
    }

    /// Assign real rectangles to the children of a container.
    pub(crate) fn relayout(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(state) = node.container() else {
            return;
        };
        let content = node.geom.real.expanse().shrink(state.border);
        let children = state.children.clone();
        let vertical = match state.arrangement {
            Arrangement::Free => {
                for child in children {
                    if let Some(rect) = self.nodes.get(child).map(|c| c.geom.free_placement(content)) {
                        self.set_real(child, rect);
                    }
                }
                return;
            }
            Arrangement::Vertical => true,
            Arrangement::Horizontal => false,
        };
        let (shown, hidden): (Vec<NodeId>, Vec<NodeId>) = children
            .into_iter()
            .filter(|c| self.nodes.contains_key(*c))
            .partition(|c| self.nodes[*c].visible);
        let requests: Vec<SizeRequest> = shown.iter().map(|c| self.nodes[*c].geom.effective()).collect();
        for child in hidden {
            self.set_real(child, Rect::zero());
        }
        for (child, rect) in shown.into_iter().zip(stack(&requests, content, vertical)) {
            self.set_real(child, rect);
        }
    }

    /// Write a node's real rectangle. A size change notifies the widget and
    /// lays out its children.
    pub(crate) fn set_real(&mut self, id: NodeId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let old = node.geom.real;
        if old == rect {
            return;
        }
        node.geom.real = rect;
        self.request_redraw(Redraw::Incremental);
        if old.expanse() == rect.expanse() {
            return;
        }
        if let Some(w) = self.nodes[id].widget.as_mut() {
            w.area_updated(rect.expanse());
        }
        self.relayout(id);
    }

    /// Take a widget out of its slot for the duration of `f`. If the node is
    /// resized while the widget is out, the widget is told on return. If the
    /// node is destroyed meanwhile, the widget is dropped.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let size = node.geom.real.expanse();
        let mut widget = node.widget.take().ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            let now = node.geom.real.expanse();
            if now != size {
                widget.area_updated(now);
            }
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Run `f` on a typed widget with a context for its node. The widget's
    /// wish size is re-read afterwards.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: TypedId<W>,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R> {
        let node = id.id();
        let out = self.with_widget_mut(node, |w, core| {
            let any: &mut dyn Any = w;
            let w = any
                .downcast_mut::<W>()
                .ok_or_else(|| Error::Internal(format!("widget type mismatch at {node:?}")))?;
            let mut ctx = CoreContext::new(core, node);
            Ok::<R, Error>(f(w, &mut ctx))
        })??;
        self.refresh_wish(node);
        self.request_redraw(Redraw::Incremental);
        Ok(out)
    }

    /// Borrow a typed widget.
    pub fn widget<W: Widget>(&self, id: TypedId<W>) -> Option<&W> {
        let w: &dyn Widget = self.nodes.get(id.id())?.widget.as_deref()?;
        let any: &dyn Any = w;
        any.downcast_ref::<W>()
    }

    /// Binding contexts a widget declares.
    pub(crate) fn widget_contexts(&self, id: NodeId) -> &'static [&'static str] {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .map_or(&[], Widget::contexts)
    }

    /// Run an event handler on a node's widget, then re-read its wish size.
    pub(crate) fn deliver(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut dyn Context) -> Result<EventOutcome>,
    ) -> Result<EventOutcome> {
        let outcome = self.with_widget_mut(id, |w, core| {
            let mut ctx = CoreContext::new(core, id);
            f(w, &mut ctx)
        })??;
        self.refresh_wish(id);
        if outcome == EventOutcome::Handle {
            self.request_redraw(Redraw::Incremental);
        }
        Ok(outcome)
    }

    /// Check structural invariants: links agree in both directions and
    /// windows are roots.
    pub(crate) fn check_tree(&self) -> bool {
        let links = self.nodes.iter().all(|(id, n)| {
            let up = n.parent.is_none_or(|p| self.children(p).contains(&id));
            let down = n
                .children()
                .iter()
                .all(|c| self.parent(*c) == Some(id));
            up && down
        });
        let roots = self
            .windows
            .iter()
            .all(|w| self.nodes.get(w.id).is_some_and(|n| n.parent.is_none()));
        links && roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A widget with a settable wish.
    struct Sized(SizeRequest);

    impl Widget for Sized {
        fn wish(&self) -> SizeRequest {
            self.0
        }
    }

    /// Records the sizes it was given.
    #[derive(Default)]
    struct Recorder {
        sizes: Vec<Expanse>,
        mounts: usize,
    }

    impl Widget for Recorder {
        fn area_updated(&mut self, size: Expanse) {
            self.sizes.push(size);
        }

        fn on_mount(&mut self, _ctx: &mut dyn Context) -> Result<()> {
            self.mounts += 1;
            Ok(())
        }
    }

    /// A plain container.
    struct Group;
    impl Widget for Group {}

    #[test]
    fn attach_errors() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        let inner = core.add_container(Group, ContainerConfig::new()).id();
        let leaf = core.add(Recorder::default(), NodeConfig::new()).id();

        assert_eq!(core.attach(leaf, root), Err(Error::NotAContainer(leaf)));
        core.attach(root, inner)?;
        assert_eq!(core.attach(root, inner), Err(Error::AlreadyAttached(inner)));
        assert_eq!(
            core.attach(inner, root),
            Err(Error::WouldCreateCycle {
                parent: inner,
                child: root
            })
        );
        assert_eq!(
            core.attach(inner, inner),
            Err(Error::AlreadyAttached(inner))
        );
        core.attach(inner, leaf)?;
        core.remove(inner)?;
        assert!(!core.contains(leaf));
        assert_eq!(core.attach(root, leaf), Err(Error::NodeNotFound(leaf)));
        assert!(core.children(root).is_empty());
        Ok(())
    }

    #[test]
    fn detach_keeps_subtree() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        let inner = core.add_container(Group, ContainerConfig::new()).id();
        let leaf = core.add(Recorder::default(), NodeConfig::new()).id();
        core.attach(root, inner)?;
        core.attach(inner, leaf)?;
        core.detach(inner)?;
        assert_eq!(core.parent(inner), None);
        assert_eq!(core.root_of(leaf), inner);
        core.attach(root, inner)?;
        assert_eq!(core.root_of(leaf), root);
        Ok(())
    }

    #[test]
    fn mount_and_area_updated() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        core.layout_root(root, Expanse::new(20, 10));
        let rec = core.add(Recorder::default(), NodeConfig::new().at(2, 2).size(5, Extent::Auto));
        core.attach(root, rec)?;
        assert_eq!(core.real(rec), Some(Rect::new(2, 2, 5, 8)));
        core.layout_root(root, Expanse::new(20, 6));
        core.set_size(rec, SizeRequest::fixed(4, 2))?;
        let p = core.widget(rec).map(|p| (p.sizes.clone(), p.mounts));
        assert_eq!(
            p,
            Some((
                vec![Expanse::new(5, 8), Expanse::new(5, 4), Expanse::new(4, 2)],
                1
            ))
        );
        Ok(())
    }

    #[test]
    fn unset_position_gets_no_space() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        core.layout_root(root, Expanse::new(20, 10));
        let a = core.add(Recorder::default(), NodeConfig::new().unplaced());
        core.attach(root, a)?;
        assert_eq!(core.real(a), Some(Rect::zero()));
        core.set_position(a, Some(Point { x: 1, y: 1 }))?;
        assert_eq!(core.real(a), Some(Rect::new(1, 1, 19, 9)));
        Ok(())
    }

    #[test]
    fn stack_follows_wishes() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        core.layout_root(root, Expanse::new(10, 10));
        let list = core
            .add_container(
                Group,
                ContainerConfig::new()
                    .vertical()
                    .border(1)
                    .node(NodeConfig::new().size(10, 10)),
            )
            .id();
        core.attach(root, list)?;
        let a = core.add(Sized(SizeRequest::new(Extent::Auto, 2)), NodeConfig::new());
        let b = core.add(Sized(SizeRequest::AUTO), NodeConfig::new());
        core.attach(list, a)?;
        core.attach(list, b)?;
        assert_eq!(core.real(list), Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(core.real(a), Some(Rect::new(0, 0, 8, 2)));
        assert_eq!(core.real(b), Some(Rect::new(0, 2, 8, 6)));

        core.set_visible(a, false)?;
        assert_eq!(core.real(a), Some(Rect::zero()));
        assert_eq!(core.real(b), Some(Rect::new(0, 0, 8, 8)));
        assert!(!core.is_visible(a));
        assert!(core.is_visible(b));
        Ok(())
    }

    #[test]
    fn wish_change_reflows_parent() -> Result<()> {
        let mut core = Core::new();
        let root = core.add_container(Group, ContainerConfig::new()).id();
        core.layout_root(root, Expanse::new(10, 10));
        let list = core.add_container(Group, ContainerConfig::new().vertical()).id();
        core.attach(root, list)?;
        let a = core.add(Sized(SizeRequest::fixed(3, 1)), NodeConfig::new());
        let b = core.add(Sized(SizeRequest::fixed(3, 1)), NodeConfig::new());
        core.attach(list, a)?;
        core.attach(list, b)?;
        assert_eq!(
            core.node(list).map(|n| n.geometry().wish),
            Some(SizeRequest::fixed(3, 2))
        );
        assert_eq!(core.real(list), Some(Rect::new(0, 0, 3, 2)));
        core.with_widget(a, |w, _| w.0 = SizeRequest::fixed(3, 4))?;
        assert_eq!(core.real(b), Some(Rect::new(0, 4, 3, 1)));
        assert_eq!(core.real(list), Some(Rect::new(0, 0, 3, 5)));
        Ok(())
    }

    #[test]
    fn typed_access() -> Result<()> {
        let mut core = Core::new();
        let rec = core.add(Recorder::default(), NodeConfig::new());
        assert!(core.widget(rec).is_some());
        let n = core.with_widget(rec, |p, ctx| {
            assert_eq!(ctx.node_id(), rec.id());
            p.mounts + 7
        })?;
        assert_eq!(n, 7);
        assert_eq!(
            core.node(rec).map(|n| n.name().to_string()),
            Some("rec".into())
        );
        Ok(())
    }
}
