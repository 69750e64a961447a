use serde::{Deserialize, Serialize};

use crate::{
    core::{focus::ChainEntry, id::NodeId},
    geom::{Point, Rect},
    geometry::{Arrangement, Extent, Geometry, SizeRequest},
    state::NodeName,
    widget::Widget,
};

/// How far focus travels before wrapping, as set on a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusCycle {
    /// Focus stops at the edges of this container's subtree.
    None,
    /// Focus wraps within this container's subtree.
    Local,
    /// Defer to the enclosing container; at the root, wrap over the whole
    /// window.
    #[default]
    Global,
}

/// Construction options shared by every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    /// Requested position inside the parent. `None` gets no space under a
    /// free arrangement.
    pub pos: Option<Point>,
    /// Requested width.
    pub width: Extent,
    /// Requested height.
    pub height: Extent,
    /// Initial visibility.
    pub visible: bool,
    /// May the node take focus?
    pub can_focus: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            pos: Some(Point::zero()),
            width: Extent::Auto,
            height: Extent::Auto,
            visible: true,
            can_focus: false,
        }
    }
}

impl NodeConfig {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested position.
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.pos = Some(Point { x, y });
        self
    }

    /// Leave the position unset.
    pub fn unplaced(mut self) -> Self {
        self.pos = None;
        self
    }

    /// Set the requested size.
    pub fn size(mut self, width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Allow the node to take focus.
    pub fn focusable(mut self) -> Self {
        self.can_focus = true;
        self
    }

    /// The size request this configuration describes.
    pub fn request(&self) -> SizeRequest {
        SizeRequest::new(self.width, self.height)
    }
}

/// Construction options for container nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerConfig {
    /// Options shared with leaves.
    pub node: NodeConfig,
    /// Child placement.
    pub arrangement: Arrangement,
    /// Focus cycling scope.
    pub cycle: FocusCycle,
    /// Does this container take part in page-wise focus motion?
    pub page_focus: bool,
    /// Border width reserved around the children.
    pub border: u32,
}

impl ContainerConfig {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared node options.
    pub fn node(mut self, node: NodeConfig) -> Self {
        self.node = node;
        self
    }

    /// Stack children top to bottom.
    pub fn vertical(mut self) -> Self {
        self.arrangement = Arrangement::Vertical;
        self
    }

    /// Stack children left to right.
    pub fn horizontal(mut self) -> Self {
        self.arrangement = Arrangement::Horizontal;
        self
    }

    /// Set the focus cycling scope.
    pub fn cycle(mut self, cycle: FocusCycle) -> Self {
        self.cycle = cycle;
        self
    }

    /// Take part in page-wise focus motion.
    pub fn page_focus(mut self) -> Self {
        self.page_focus = true;
        self
    }

    /// Reserve a border around the children.
    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }
}

/// State held only by container nodes.
#[derive(Debug, Clone, Default)]
pub struct ContainerState {
    /// Ordered children.
    pub(crate) children: Vec<NodeId>,
    /// The child on the path to the focused widget, if any.
    pub(crate) focus_child: Option<NodeId>,
    /// Focus cycling scope.
    pub(crate) cycle: FocusCycle,
    /// Take part in page-wise focus motion.
    pub(crate) page_focus: bool,
    /// Border width.
    pub(crate) border: u32,
    /// Child placement.
    pub(crate) arrangement: Arrangement,
    /// Cached focus chain. Only a root container keeps one.
    pub(crate) chain: Option<Vec<ChainEntry>>,
}

impl ContainerState {
    /// Build the state for a fresh container.
    pub(crate) fn new(cfg: &ContainerConfig) -> Self {
        Self {
            cycle: cfg.cycle,
            page_focus: cfg.page_focus,
            border: cfg.border,
            arrangement: cfg.arrangement,
            ..Default::default()
        }
    }

    /// Ordered children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The child on the focus path.
    pub fn focus_child(&self) -> Option<NodeId> {
        self.focus_child
    }

    /// Focus cycling scope.
    pub fn cycle(&self) -> FocusCycle {
        self.cycle
    }

    /// Does this container take part in page-wise focus motion?
    pub fn page_focus(&self) -> bool {
        self.page_focus
    }

    /// Border width.
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Child placement.
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }
}

/// Leaf or container.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A node that cannot have children.
    Leaf,
    /// A node that owns an ordered list of children.
    Container(Box<ContainerState>),
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while one of the widget's callbacks
    /// is running.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Leaf or container state.
    pub(crate) kind: NodeKind,
    /// Requested, wished and real geometry.
    pub(crate) geom: Geometry,
    /// Node name, taken from the widget.
    pub(crate) name: NodeName,
    /// Own visibility flag.
    pub(crate) visible: bool,
    /// May the node take focus?
    pub(crate) can_focus: bool,
    /// Is this the focused leaf of an active window?
    pub(crate) has_focus: bool,
    /// Whether the widget mount hook has run.
    pub(crate) mounted: bool,
}

impl Node {
    /// Build a node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>, cfg: &NodeConfig, kind: NodeKind) -> Self {
        let name = widget.name();
        let wish = widget.wish();
        let can_focus = cfg.can_focus || widget.accept_focus();
        Self {
            widget: Some(widget),
            parent: None,
            kind,
            geom: Geometry {
                pos: cfg.pos,
                request: cfg.request(),
                wish,
                real: Rect::zero(),
            },
            name,
            visible: cfg.visible,
            can_focus,
            has_focus: false,
            mounted: false,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children. Leaves have none.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf => &[],
            NodeKind::Container(c) => &c.children,
        }
    }

    /// Container state, if this is a container.
    pub fn container(&self) -> Option<&ContainerState> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Container(c) => Some(c),
        }
    }

    /// Mutable container state, if this is a container.
    pub(crate) fn container_mut(&mut self) -> Option<&mut ContainerState> {
        match &mut self.kind {
            NodeKind::Leaf => None,
            NodeKind::Container(c) => Some(c),
        }
    }

    /// Is this a container?
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    /// Geometry state.
    pub fn geometry(&self) -> &Geometry {
        &self.geom
    }

    /// Real rectangle relative to the parent's content origin.
    pub fn rect(&self) -> Rect {
        self.geom.real
    }

    /// The node's own visibility flag. See `Core::is_visible` for the
    /// effective visibility.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// May the node take focus?
    pub fn can_focus(&self) -> bool {
        self.can_focus
    }

    /// Is this the focused leaf of the active window?
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Border width, zero for leaves.
    pub(crate) fn border(&self) -> u32 {
        self.container().map_or(0, |c| c.border)
    }
}
