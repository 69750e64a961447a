use crate::{
    core::{
        compositor::{Compositor, WindowConfig, WindowManager},
        config::Config,
        focus::{FocusDirection, FocusManager},
        id::{NodeId, TypedId},
        keymap::{self, Bindings, KeyMap},
        render::RenderBackend,
        world::Core,
    },
    error::Result,
    event::{Event, key::Key},
    geom::Expanse,
    style::StyleMap,
    widget::{EventOutcome, Widget},
    widgets::TextEdit,
};

/// Toolkit-wide action that forces a full repaint.
const REDRAW_SCREEN: &str = "redraw-screen";
/// Window action that closes the window.
const CLOSE_WINDOW: &str = "close-window";

/// The toolkit entry point: owns the widget arena and the services the tree
/// runs against, routes input and drives the compositor.
///
/// Nothing here is global, so any number of toolkits can live side by side.
pub struct Toolkit {
    /// The widget arena.
    core: Core,
    /// Key-binding lookup.
    bindings: Box<dyn Bindings>,
    /// Named styles.
    styles: StyleMap,
    /// Configuration the services were built from.
    config: Config,
    /// Frame composition and output.
    compositor: Compositor,
}

impl Toolkit {
    /// Build a toolkit from configuration, with the default key map extended
    /// by the configured bindings and the default style table.
    pub fn new(config: Config) -> Result<Self> {
        let mut keymap = KeyMap::with_defaults();
        keymap.load(&config.bindings)?;
        let mut styles = StyleMap::new();
        styles.extend(&config.styles);
        Ok(Self::with_services(config, Box::new(keymap), styles))
    }

    /// Build a toolkit with explicit services.
    pub fn with_services(config: Config, bindings: Box<dyn Bindings>, styles: StyleMap) -> Self {
        let compositor = Compositor::new(config.color_pairs, config.marker_char);
        Self {
            core: Core::new(),
            bindings,
            styles,
            config,
            compositor,
        }
    }

    /// The widget arena.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// Mutable access to the widget arena.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// The style table.
    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The compositor.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// A text edit configured with this toolkit's tab stop and gap size.
    pub fn text_edit(&self, text: &str) -> TextEdit {
        TextEdit::new(text)
            .with_tab_stop(self.config.tab_stop)
            .with_gap_size(self.config.gap_size)
    }

    /// Register a window.
    pub fn add_window<W: Widget>(&mut self, widget: W, cfg: WindowConfig) -> Result<TypedId<W>> {
        self.core.add_window(widget, cfg)
    }

    /// Raise a window within its class.
    pub fn raise_window(&mut self, id: impl Into<NodeId>) -> Result<()> {
        self.core.raise_window(id.into())
    }

    /// Re-pick the active window.
    pub fn focus_window(&mut self) {
        self.core.focus_window();
    }

    /// React to a new screen size.
    pub fn resize(&mut self, size: Expanse) {
        self.core.resize(size);
    }

    /// Ask for a full clear and repaint.
    pub fn redraw_screen(&mut self) {
        self.core.redraw_screen();
    }

    /// Send pending changes to the backend. Returns `false` if nothing was
    /// pending.
    pub fn render<R: RenderBackend>(&mut self, backend: &mut R) -> Result<bool> {
        self.compositor.render(&mut self.core, &self.styles, backend)
    }

    /// Route an input event. Returns `true` if something handled it.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Resize(size) => {
                self.resize(size);
                Ok(true)
            }
            Event::Text(text) => self.dispatch_text(&text),
            Event::Key(key) => self.dispatch_key(key),
        }
    }

    /// The focused leaf of the active window, repairing a focus that is
    /// hidden or no longer focusable first.
    fn focus_target(&mut self) -> Result<Option<NodeId>> {
        let Some(win) = self.core.active_window() else {
            return Ok(None);
        };
        if let Some(f) = self.core.focused_widget(win)
            && !(self.core.is_visible(f) && self.core.node(f).is_some_and(|n| n.can_focus()))
        {
            self.core.move_focus(win, FocusDirection::Next)?;
        }
        Ok(Some(self.core.focused_widget(win).unwrap_or(win)))
    }

    /// Offer text to the focused leaf.
    fn dispatch_text(&mut self, text: &str) -> Result<bool> {
        let Some(target) = self.focus_target()? else {
            return Ok(false);
        };
        let outcome = self.core.deliver(target, |w, ctx| w.on_text(text, ctx))?;
        Ok(outcome != EventOutcome::Ignore)
    }

    /// Route a key: toolkit bindings first, then each node from the focused
    /// leaf up to the window root, then the focused leaf as text.
    fn dispatch_key(&mut self, key: Key) -> Result<bool> {
        if let Some(action) = self.bindings.lookup(keymap::TOOLKIT, &key)
            && action == REDRAW_SCREEN
        {
            self.redraw_screen();
            return Ok(true);
        }
        let Some(target) = self.focus_target()? else {
            return Ok(false);
        };
        let mut cur = Some(target);
        while let Some(id) = cur {
            for context in self.contexts(id) {
                let Some(action) = self.bindings.lookup(context, &key).map(String::from) else {
                    continue;
                };
                tracing::trace!(%key, context, action, node = ?id, "dispatch");
                let outcome = match context {
                    keymap::CONTAINER => self.focus_action(id, &action)?,
                    keymap::WINDOW => self.window_action(id, &action)?,
                    _ => self
                        .core
                        .deliver(id, |w, ctx| w.on_action(&action, ctx))?,
                };
                if outcome != EventOutcome::Ignore {
                    return Ok(true);
                }
                if !self.core.contains(id) {
                    return Ok(false);
                }
            }
            cur = self.core.parent(id);
        }
        match key.text() {
            Some(c) => {
                let mut buf = [0; 4];
                self.dispatch_text(c.encode_utf8(&mut buf))
            }
            None => Ok(false),
        }
    }

    /// Binding contexts of a node: the widget's own, then `container` for
    /// containers and `window` for window roots.
    fn contexts(&self, id: NodeId) -> Vec<&'static str> {
        let mut out = self.core.widget_contexts(id).to_vec();
        if self.core.node(id).is_some_and(|n| n.is_container()) {
            out.push(keymap::CONTAINER);
        }
        if self.core.is_window(id) {
            out.push(keymap::WINDOW);
        }
        out
    }

    /// Run a focus action bound in a container.
    fn focus_action(&mut self, id: NodeId, action: &str) -> Result<EventOutcome> {
        let Ok(dir) = action.parse::<FocusDirection>() else {
            return Ok(EventOutcome::Ignore);
        };
        Ok(if self.core.move_focus(id, dir)? {
            EventOutcome::Handle
        } else {
            EventOutcome::Consume
        })
    }

    /// Run a window action.
    fn window_action(&mut self, id: NodeId, action: &str) -> Result<EventOutcome> {
        if action != CLOSE_WINDOW {
            return Ok(EventOutcome::Ignore);
        }
        self.core.close_window(id)?;
        Ok(EventOutcome::Handle)
    }
}
