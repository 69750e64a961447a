use serde::{Deserialize, Serialize};

use crate::{
    core::{
        focus::FocusManager,
        id::{NodeId, TypedId},
        node::{ContainerConfig, Node},
        render::{Render, RenderBackend},
        termbuf::TermBuf,
        world::{Core, Redraw},
    },
    error::{Error, Result},
    geom::{Expanse, Point, PointI32, Rect, RectI32},
    geometry::negotiate_window,
    style::{Palette, StyleMap},
    widget::{DrawContext, Widget},
};

/// Stacking class of a window. Classes are drawn bottom to top in
/// declaration order; within a class, later windows are drawn above earlier
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowType {
    /// Background window that never takes focus.
    NonFocusable,
    /// An ordinary window.
    #[default]
    Normal,
    /// Always above normal windows.
    Top,
}

/// Construction options for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowConfig {
    /// Options for the root container.
    pub container: ContainerConfig,
    /// Stacking class.
    pub kind: WindowType,
    /// Screen position of the top-left corner. May be off screen.
    pub pos: PointI32,
}

impl WindowConfig {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root container options.
    pub fn container(mut self, container: ContainerConfig) -> Self {
        self.container = container;
        self
    }

    /// Set the stacking class.
    pub fn kind(mut self, kind: WindowType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the screen position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.pos = PointI32::new(x, y);
        self
    }

    /// Set the requested size of the window.
    pub fn size(mut self, w: u32, h: u32) -> Self {
        self.container.node = self.container.node.size(w, h);
        self
    }
}

/// A registered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    /// The window's root container.
    pub id: NodeId,
    /// Stacking class.
    pub kind: WindowType,
    /// Screen position.
    pub pos: PointI32,
}

/// The window registry and z-order.
pub trait WindowManager {
    /// Register a new root container as a window, above the others of its
    /// class.
    fn add_window<W: Widget>(&mut self, widget: W, cfg: WindowConfig) -> Result<TypedId<W>>;

    /// Is `id` a registered window?
    fn is_window(&self, id: NodeId) -> bool;

    /// Registered windows, oldest first.
    fn windows(&self) -> Vec<NodeId>;

    /// The window holding terminal focus.
    fn active_window(&self) -> Option<NodeId>;

    /// The screen area of a window.
    fn window_area(&self, id: NodeId) -> Option<RectI32>;

    /// Move a window above the others of its class.
    fn raise_window(&mut self, id: NodeId) -> Result<()>;

    /// Move a window on screen.
    fn move_window(&mut self, id: NodeId, pos: PointI32) -> Result<()>;

    /// Unregister a window and destroy its tree.
    fn close_window(&mut self, id: NodeId) -> Result<()>;

    /// Pick the active window: the top-most visible `Top` window, else the
    /// top-most visible `Normal` one. Focus is taken from the old window
    /// and restored in the new one.
    fn focus_window(&mut self);

    /// Renegotiate a window's size against the screen.
    fn update_window_area(&mut self, id: NodeId);

    /// Set the screen size, renegotiate every window and ask for a full
    /// repaint.
    fn resize(&mut self, screen: Expanse);

    /// Ask for a full clear and repaint.
    fn redraw_screen(&mut self);

    /// Visible windows, bottom to top.
    fn draw_order(&self) -> Vec<NodeId>;
}

impl WindowManager for Core {
    fn add_window<W: Widget>(&mut self, widget: W, cfg: WindowConfig) -> Result<TypedId<W>> {
        let id = self.add_container(widget, cfg.container);
        self.windows.push(WindowEntry {
            id: id.id(),
            kind: cfg.kind,
            pos: cfg.pos,
        });
        self.mount(id.id())?;
        self.update_window_area(id.id());
        tracing::debug!(window = ?id.id(), kind = ?cfg.kind, "window added");
        self.focus_window();
        self.request_redraw(Redraw::Incremental);
        Ok(id)
    }

    fn is_window(&self, id: NodeId) -> bool {
        self.windows.iter().any(|w| w.id == id)
    }

    fn windows(&self) -> Vec<NodeId> {
        self.windows.iter().map(|w| w.id).collect()
    }

    fn active_window(&self) -> Option<NodeId> {
        self.active
    }

    fn window_area(&self, id: NodeId) -> Option<RectI32> {
        let entry = self.windows.iter().find(|w| w.id == id)?;
        let size = self.real(id)?.expanse();
        Some(RectI32::at(entry.pos, size))
    }

    fn raise_window(&mut self, id: NodeId) -> Result<()> {
        let idx = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(Error::NotAWindow(id))?;
        let entry = self.windows.remove(idx);
        self.windows.push(entry);
        tracing::debug!(window = ?id, "window raised");
        self.focus_window();
        self.request_redraw(Redraw::Incremental);
        Ok(())
    }

    fn move_window(&mut self, id: NodeId, pos: PointI32) -> Result<()> {
        let entry = self
            .windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::NotAWindow(id))?;
        entry.pos = pos;
        self.update_window_area(id);
        self.request_redraw(Redraw::Incremental);
        Ok(())
    }

    fn close_window(&mut self, id: NodeId) -> Result<()> {
        if !self.is_window(id) {
            return Err(Error::NotAWindow(id));
        }
        self.remove(id)
    }

    fn focus_window(&mut self) {
        let pick = |kind: WindowType| {
            self.windows
                .iter()
                .rev()
                .find(|w| w.kind == kind && self.is_visible(w.id))
                .map(|w| w.id)
        };
        let next = pick(WindowType::Top).or_else(|| pick(WindowType::Normal));
        if next == self.active {
            if let Some(win) = next
                && self.focused_widget(win).is_none()
                && let Err(e) = self.grab_focus(win)
            {
                tracing::warn!(window = ?win, error = %e, "could not focus window");
            }
            return;
        }
        if let Some(old) = self.active {
            self.ungrab_focus(old);
        }
        tracing::debug!(from = ?self.active, to = ?next, "window focus");
        self.active = next;
        if let Some(win) = next
            && !self.restore_focus(win)
            && let Err(e) = self.grab_focus(win)
        {
            tracing::warn!(window = ?win, error = %e, "could not focus window");
        }
        self.request_redraw(Redraw::Incremental);
    }

    fn update_window_area(&mut self, id: NodeId) {
        let Some(entry) = self.windows.iter().find(|w| w.id == id).copied() else {
            return;
        };
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let size = negotiate_window(entry.pos, node.geom.request, node.geom.wish, self.screen);
        self.set_real(id, size.rect());
    }

    fn resize(&mut self, screen: Expanse) {
        tracing::debug!(?screen, "screen resized");
        self.screen = screen;
        for id in self.windows() {
            self.update_window_area(id);
        }
        self.request_redraw(Redraw::Full);
    }

    fn redraw_screen(&mut self) {
        self.request_redraw(Redraw::Full);
    }

    fn draw_order(&self) -> Vec<NodeId> {
        [WindowType::NonFocusable, WindowType::Normal, WindowType::Top]
            .into_iter()
            .flat_map(|kind| {
                self.windows
                    .iter()
                    .filter(move |w| w.kind == kind && self.is_visible(w.id))
                    .map(|w| w.id)
            })
            .collect()
    }
}

/// Turns the window stack into terminal output.
///
/// Each window is drawn onto its own surface the size of its real extent,
/// which is then clipped to the screen and copied into the frame. Frames
/// are diffed against the previous one unless a full repaint was asked for.
#[derive(Debug)]
pub struct Compositor {
    /// The last frame sent to the backend.
    prev: Option<TermBuf>,
    /// Colour pairs in use.
    palette: Palette,
    /// Glyph marking an unfocused top-most window.
    marker: char,
}

impl Compositor {
    /// A compositor with a colour pair budget and a marker glyph.
    pub fn new(color_pairs: usize, marker: char) -> Self {
        Self {
            prev: None,
            palette: Palette::new(color_pairs),
            marker,
        }
    }

    /// The last frame sent to the backend.
    pub fn frame(&self) -> Option<&TermBuf> {
        self.prev.as_ref()
    }

    /// Render pending changes. Returns `false` if nothing was pending.
    pub fn render<R: RenderBackend>(
        &mut self,
        core: &mut Core,
        styles: &StyleMap,
        backend: &mut R,
    ) -> Result<bool> {
        let redraw = core.take_redraw();
        let resized = self.prev.as_ref().is_none_or(|p| p.size() != core.screen());
        if redraw == Redraw::None && !resized {
            return Ok(false);
        }
        let frame = self.compose(core, styles);
        match &self.prev {
            Some(prev) if redraw != Redraw::Full && !resized => frame.diff(prev, backend)?,
            _ => {
                tracing::debug!(?redraw, resized, "full repaint");
                backend.clear()?;
                frame.render(backend)?;
            }
        }
        self.prev = Some(frame);
        Ok(true)
    }

    /// Draw every visible window into a fresh screen buffer.
    pub fn compose(&mut self, core: &mut Core, styles: &StyleMap) -> TermBuf {
        let base = styles.get("/");
        let mut screen = TermBuf::new(core.screen(), ' ', base.clone());
        let order = core.draw_order();
        let top = order.last().copied();
        for win in order {
            let Some(area) = core.window_area(win) else {
                continue;
            };
            let mut surface = TermBuf::new(area.expanse(), ' ', base.clone());
            let clip = surface.rect();
            self.draw_node(core, styles, &mut surface, win, clip, PointI32::zero());
            if top == Some(win) && core.focused_widget(win).is_none() {
                let mut r = Render::new(
                    &mut surface,
                    styles,
                    &mut self.palette,
                    clip,
                    PointI32::zero(),
                    area.expanse(),
                );
                if let Err(e) = r.put("window/marker", Point::zero(), self.marker) {
                    tracing::warn!(window = ?win, error = %e, "marker draw failed");
                }
            }
            if let Some(visible) = area.intersect_rect(screen.rect()) {
                let offset = |at: u32, origin: i32| {
                    u32::try_from(i64::from(at) - i64::from(origin)).unwrap_or(0)
                };
                let src = Rect::new(
                    offset(visible.tl.x, area.tl.x),
                    offset(visible.tl.y, area.tl.y),
                    visible.w,
                    visible.h,
                );
                screen.blit(&surface, src, visible.tl);
            }
        }
        screen
    }

    /// Draw a node and its visible subtree. `origin` is the node's top-left
    /// in surface coordinates and `clip` the part of the surface it may touch.
    fn draw_node(
        &mut self,
        core: &mut Core,
        styles: &StyleMap,
        buf: &mut TermBuf,
        id: NodeId,
        clip: Rect,
        origin: PointI32,
    ) {
        let Some(node) = core.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let size = node.geom.real.expanse();
        let ctx = DrawContext {
            node: id,
            size,
            focused: node.has_focus,
            border: node.border(),
        };
        let palette = &mut self.palette;
        let drawn = core.with_widget_mut(id, |w, _| {
            let mut r = Render::new(&mut *buf, styles, palette, clip, origin, size);
            w.render(&mut r, &ctx)
        });
        if let Err(e) = drawn.and_then(|r| r) {
            tracing::warn!(node = ?id, error = %e, "widget draw failed");
        }

        let Some(state) = core.nodes.get(id).and_then(Node::container) else {
            return;
        };
        let border = Point {
            x: state.border,
            y: state.border,
        };
        let children = state.children.clone();
        let content = RectI32::at(origin + PointI32::from(border), size.shrink(state.border));
        let Some(content) = content.intersect_rect(clip) else {
            return;
        };
        for child in children {
            let Some(r) = core.real(child) else {
                continue;
            };
            let at = origin + PointI32::from(border) + PointI32::from(r.tl);
            if let Some(child_clip) = RectI32::at(at, r.expanse()).intersect_rect(content) {
                self.draw_node(core, styles, buf, child, child_clip, at);
            }
        }
    }
}
