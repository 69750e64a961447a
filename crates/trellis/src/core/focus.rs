use std::str::FromStr;

use crate::{
    core::{
        id::NodeId,
        node::{FocusCycle, Node, NodeKind},
        world::{Core, Redraw},
    },
    error::{Error, Result},
};

/// A focus motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// The previous focusable widget in tree order.
    Previous,
    /// The next focusable widget in tree order.
    Next,
    /// Up. Moves like `Previous`.
    Up,
    /// Down. Moves like `Next`.
    Down,
    /// Left. Moves like `Previous`.
    Left,
    /// Right. Moves like `Next`.
    Right,
    /// Back by about half a page of the enclosing paging container.
    PageUp,
    /// Forward by about half a page of the enclosing paging container.
    PageDown,
    /// The first focusable widget in the enclosing segment.
    Begin,
    /// The last focusable widget in the enclosing segment.
    End,
}

impl FocusDirection {
    /// Does this motion walk toward the start of the chain?
    fn backward(self) -> bool {
        matches!(self, Self::Previous | Self::Up | Self::Left | Self::PageUp)
    }

    /// Is this a paging motion?
    fn paging(self) -> bool {
        matches!(self, Self::PageUp | Self::PageDown)
    }

    /// The action name bound to this motion.
    pub fn action(self) -> &'static str {
        match self {
            Self::Previous => "focus-previous",
            Self::Next => "focus-next",
            Self::Up => "focus-up",
            Self::Down => "focus-down",
            Self::Left => "focus-left",
            Self::Right => "focus-right",
            Self::PageUp => "focus-page-up",
            Self::PageDown => "focus-page-down",
            Self::Begin => "focus-begin",
            Self::End => "focus-end",
        }
    }
}

/// All motions, for action lookup.
const DIRECTIONS: [FocusDirection; 10] = [
    FocusDirection::Previous,
    FocusDirection::Next,
    FocusDirection::Up,
    FocusDirection::Down,
    FocusDirection::Left,
    FocusDirection::Right,
    FocusDirection::PageUp,
    FocusDirection::PageDown,
    FocusDirection::Begin,
    FocusDirection::End,
];

impl FromStr for FocusDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DIRECTIONS
            .into_iter()
            .find(|d| d.action() == s)
            .ok_or_else(|| Error::Parse(format!("unknown focus action: {s}")))
    }
}

/// One entry of a flattened focus chain.
///
/// The chain is stored in pre-order. The subtree of the entry at index `i`
/// occupies `i + 1..end`, and `parent` is the index of the enclosing
/// container entry. The root is entry 0 and is its own parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry {
    /// The node.
    pub node: NodeId,
    /// Index of the enclosing container entry.
    pub parent: usize,
    /// One past the last index of this entry's subtree.
    pub end: usize,
    /// Is this a container entry?
    pub container: bool,
}

/// Focus management over the widget tree.
///
/// Every window root keeps its own focus path: each container on the path
/// records its `focus_child`, down to a single leaf. The leaf reports
/// `has_focus` only while its window is active.
pub trait FocusManager {
    /// Move focus within the tree containing `node`. Returns `true` if the
    /// focused widget changed. A move with no focusable target is a no-op.
    fn move_focus(&mut self, node: NodeId, dir: FocusDirection) -> Result<bool>;

    /// Focus `node`, or if it is a container, the first focusable widget
    /// under it. Returns `false` if nothing could take focus.
    fn grab_focus(&mut self, node: NodeId) -> Result<bool>;

    /// Record `child` as the focus child of `container`, and `container` as
    /// the focus child of each of its ancestors.
    fn set_focus_child(&mut self, container: NodeId, child: NodeId) -> Result<()>;

    /// Tear down the focus path below `node`, from the top down.
    fn clean_focus(&mut self, node: NodeId);

    /// The leaf at the end of the focus path under `node`, if any.
    fn focused_widget(&self, node: NodeId) -> Option<NodeId>;

    /// Give the focused leaf under `root` terminal focus again. Returns
    /// `false` if there is no focus path.
    fn restore_focus(&mut self, root: NodeId) -> bool;

    /// Drop terminal focus from the focused leaf under `root`, keeping the
    /// path so it can be restored.
    fn ungrab_focus(&mut self, root: NodeId);

    /// The focus chain of the tree containing `node`, rebuilding it if it is
    /// stale.
    fn focus_chain(&mut self, node: NodeId) -> Vec<ChainEntry>;
}

impl FocusManager for Core {
    fn move_focus(&mut self, node: NodeId, dir: FocusDirection) -> Result<bool> {
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(node));
        }
        let root = self.root_of(node);
        if !self.nodes[root].is_container() {
            return Ok(false);
        }
        let before = self.focused_widget(root);
        let chain = self.focus_chain(root);
        let target = route(self, root, &chain, dir);
        let moved = match target {
            Some(t) if Some(t) != before => self.grab_focus(t)?,
            _ => false,
        };
        tracing::debug!(?dir, ?before, after = ?self.focused_widget(root), moved, "focus move");
        if moved || before != self.focused_widget(root) {
            self.request_redraw(Redraw::Incremental);
        }
        Ok(moved)
    }

    fn grab_focus(&mut self, node: NodeId) -> Result<bool> {
        let n = self.nodes.get(node).ok_or(Error::NodeNotFound(node))?;
        if let NodeKind::Container(state) = &n.kind {
            for child in state.children.clone() {
                if self.grab_focus(child)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }
        let Some(parent) = n.parent else {
            return Ok(false);
        };
        if !n.can_focus || !self.is_visible(node) {
            return Ok(false);
        }
        let root = self.root_of(node);
        self.clean_focus(root);
        self.set_focus_child(parent, node)?;
        let active = self.is_active_root(root);
        if let Some(n) = self.nodes.get_mut(node) {
            n.has_focus = active;
        }
        self.request_redraw(Redraw::Incremental);
        Ok(true)
    }

    fn set_focus_child(&mut self, container: NodeId, child: NodeId) -> Result<()> {
        let c = self
            .nodes
            .get(container)
            .ok_or(Error::NodeNotFound(container))?;
        if !c.is_container() {
            return Err(Error::NotAContainer(container));
        }
        let owns = self.nodes.get(child).and_then(Node::parent) == Some(container);
        if !owns {
            return Err(Error::Focus(format!(
                "{child:?} is not a child of {container:?}"
            )));
        }
        let parent = c.parent;
        if let Some(parent) = parent {
            self.set_focus_child(parent, container)?;
        }
        if let Some(state) = self.nodes[container].container_mut() {
            state.focus_child = Some(child);
        }
        Ok(())
    }

    fn clean_focus(&mut self, node: NodeId) {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let Some(n) = self.nodes.get_mut(id) else {
                return;
            };
            cur = match &mut n.kind {
                NodeKind::Container(state) => state.focus_child.take(),
                NodeKind::Leaf => {
                    n.has_focus = false;
                    None
                }
            };
        }
    }

    fn focused_widget(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = node;
        loop {
            let n = self.nodes.get(cur)?;
            match &n.kind {
                NodeKind::Container(state) => cur = state.focus_child?,
                NodeKind::Leaf if cur == node => return n.has_focus.then_some(cur),
                NodeKind::Leaf => return Some(cur),
            }
        }
    }

    fn restore_focus(&mut self, root: NodeId) -> bool {
        let Some(leaf) = self.focused_widget(root) else {
            return false;
        };
        if let Some(n) = self.nodes.get_mut(leaf) {
            n.has_focus = true;
        }
        self.request_redraw(Redraw::Incremental);
        true
    }

    fn ungrab_focus(&mut self, root: NodeId) {
        if let Some(leaf) = self.focused_widget(root)
            && let Some(n) = self.nodes.get_mut(leaf)
        {
            n.has_focus = false;
            self.request_redraw(Redraw::Incremental);
        }
    }

    fn focus_chain(&mut self, node: NodeId) -> Vec<ChainEntry> {
        let root = self.root_of(node);
        if let Some(chain) = self
            .nodes
            .get(root)
            .and_then(Node::container)
            .and_then(|c| c.chain.clone())
        {
            return chain;
        }
        let chain = build_chain(self, root);
        if let Some(state) = self.nodes.get_mut(root).and_then(Node::container_mut) {
            state.chain = Some(chain.clone());
        }
        chain
    }
}

/// Flatten the focusable part of the tree under `root`.
fn build_chain(core: &Core, root: NodeId) -> Vec<ChainEntry> {
    let mut chain = vec![ChainEntry {
        node: root,
        parent: 0,
        end: 1,
        container: true,
    }];
    append_children(core, root, 0, &mut chain);
    chain[0].end = chain.len();
    chain
}

/// Append the chain entries for the children of the container at `idx`.
fn append_children(core: &Core, container: NodeId, idx: usize, chain: &mut Vec<ChainEntry>) {
    let Some(state) = core.nodes.get(container).and_then(Node::container) else {
        return;
    };
    for &child in &state.children {
        let Some(node) = core.nodes.get(child) else {
            continue;
        };
        if node.is_container() {
            if !node.visible {
                continue;
            }
            let at = chain.len();
            chain.push(ChainEntry {
                node: child,
                parent: idx,
                end: at + 1,
                container: true,
            });
            append_children(core, child, at, chain);
            if chain.len() == at + 1 {
                chain.pop();
            } else {
                chain[at].end = chain.len();
            }
        } else if (node.can_focus && node.visible) || state.focus_child == Some(child) {
            chain.push(ChainEntry {
                node: child,
                parent: idx,
                end: chain.len() + 1,
                container: false,
            });
        }
    }
}

/// Can the entry take focus right now?
fn focusable(core: &Core, entry: &ChainEntry) -> bool {
    !entry.container
        && core.nodes.get(entry.node).is_some_and(|n| n.can_focus)
        && core.is_visible(entry.node)
}

/// Resolve the target of a focus motion, repairing a focus that is hidden or
/// no longer focusable on the way.
fn route(core: &mut Core, root: NodeId, chain: &[ChainEntry], dir: FocusDirection) -> Option<NodeId> {
    let len = chain.len();
    let mut start = 1;
    let mut current = None;
    if let Some(focus) = core.focused_widget(root) {
        match chain.iter().position(|e| e.node == focus) {
            Some(i) if focusable(core, &chain[i]) => current = Some(i),
            Some(i) => {
                let parent = chain[i].parent;
                let local = (i + 1..chain[parent].end).chain(parent + 1..i);
                if let Some(j) = local.into_iter().find(|&j| focusable(core, &chain[j])) {
                    return Some(chain[j].node);
                }
                core.clean_focus(root);
                start = i + 1;
            }
            None => core.clean_focus(root),
        }
    }
    let Some(idx) = current else {
        let start = start.min(len);
        return (start..len)
            .chain(1..start)
            .find(|&j| focusable(core, &chain[j]))
            .map(|j| chain[j].node);
    };

    let mut scope = FocusCycle::Global;
    let mut p = chain[idx].parent;
    while p != 0 {
        scope = core.nodes[chain[p].node]
            .container()
            .map_or(FocusCycle::Global, |c| c.cycle);
        if scope != FocusCycle::Global {
            break;
        }
        p = chain[p].parent;
    }

    let mut page = None;
    if dir.paging() {
        p = collapse_pass_through(core, chain, p);
        let container = chain[p].node;
        let pages = core.nodes[container]
            .container()
            .is_some_and(|c| c.page_focus);
        if !pages {
            return None;
        }
        scope = FocusCycle::None;
        let max = i64::from(core.nodes[container].geom.real.h / 2);
        page = Some((container, max, offset_y(core, chain[idx].node, container)));
    }

    let segment = p + 1..chain[p].end;
    match dir {
        FocusDirection::Begin => segment
            .into_iter()
            .find(|&j| focusable(core, &chain[j]))
            .map(|j| chain[j].node),
        FocusDirection::End => segment
            .into_iter()
            .rev()
            .find(|&j| focusable(core, &chain[j]))
            .map(|j| chain[j].node),
        _ => {
            let bounds = match scope {
                FocusCycle::Global => (1, len),
                FocusCycle::Local | FocusCycle::None => (segment.start, segment.end),
            };
            let walk = Walk {
                chain,
                bounds,
                wrap: scope != FocusCycle::None,
                backward: dir.backward(),
                page,
            };
            walk.run(core, idx).map(|j| chain[j].node)
        }
    }
}

/// If the container at `p` has a single child entry that is itself a
/// container, descend into it, repeatedly.
fn collapse_pass_through(core: &Core, chain: &[ChainEntry], mut p: usize) -> usize {
    loop {
        let mut kids = (p + 1..chain[p].end).filter(|&j| chain[j].parent == p);
        let (Some(only), None) = (kids.next(), kids.next()) else {
            return p;
        };
        if !chain[only].container || focusable(core, &chain[only]) {
            return p;
        }
        p = only;
    }
}

/// Vertical offset of `node` inside the content area of `ancestor`.
fn offset_y(core: &Core, node: NodeId, ancestor: NodeId) -> i64 {
    let mut y = 0;
    let mut cur = node;
    while cur != ancestor {
        let Some(n) = core.nodes.get(cur) else {
            break;
        };
        y += i64::from(n.geom.real.tl.y);
        let Some(parent) = n.parent else {
            break;
        };
        let p = &core.nodes[parent];
        y += i64::from(p.border());
        cur = parent;
    }
    y
}

/// A bounded walk along the chain.
struct Walk<'a> {
    /// The chain.
    chain: &'a [ChainEntry],
    /// Index range walked, end exclusive.
    bounds: (usize, usize),
    /// Wrap at the ends of the range.
    wrap: bool,
    /// Walk toward the start.
    backward: bool,
    /// Paging container, half its height and the origin offset.
    page: Option<(NodeId, i64, i64)>,
}

impl Walk<'_> {
    /// Walk from `from` to the target index. Without wrapping, hitting the
    /// end of the range yields the last focusable entry passed.
    fn run(&self, core: &Core, from: usize) -> Option<usize> {
        let (begin, end) = self.bounds;
        if begin >= end {
            return None;
        }
        let mut i = from;
        let mut last = None;
        for _ in 0..=(end - begin) {
            if !self.wrap {
                let at_edge = if self.backward { i <= begin } else { i + 1 >= end };
                if at_edge {
                    return last;
                }
            }
            if self.backward {
                if i <= begin {
                    i = end;
                }
                i -= 1;
            } else {
                i += 1;
                if i >= end {
                    i = begin;
                }
            }
            if !focusable(core, &self.chain[i]) {
                continue;
            }
            let Some((container, max, origin)) = self.page else {
                return Some(i);
            };
            let y = offset_y(core, self.chain[i].node, container);
            let travelled = if self.backward { origin - y } else { y - origin };
            if travelled >= max {
                return Some(i);
            }
            last = Some(i);
        }
        last
    }
}
