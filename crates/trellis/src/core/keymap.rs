use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{error::Result, event::key::Key};

/// Binding context consulted before anything else.
pub const TOOLKIT: &str = "toolkit";
/// Binding context of every container; its actions move focus.
pub const CONTAINER: &str = "container";
/// Binding context of top-level windows.
pub const WINDOW: &str = "window";
/// Binding context of text entry widgets.
pub const TEXTENTRY: &str = "textentry";
/// Binding context of buttons.
pub const BUTTON: &str = "button";

/// The key-binding lookup service: maps a key, in a named context, to an
/// action name.
pub trait Bindings: Send {
    /// Look up the action bound to `key` in `context`.
    fn lookup(&self, context: &str, key: &Key) -> Option<&str>;
}

/// One binding, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    /// Context name.
    pub context: String,
    /// Key, in the `Ctrl-x` syntax.
    pub key: String,
    /// Action name.
    pub action: String,
}

/// The default bindings as (context, key, action).
const DEFAULTS: &[(&str, &str, &str)] = &[
    (CONTAINER, "Shift-Tab", "focus-previous"),
    (CONTAINER, "Tab", "focus-next"),
    (CONTAINER, "Up", "focus-up"),
    (CONTAINER, "Down", "focus-down"),
    (CONTAINER, "Left", "focus-left"),
    (CONTAINER, "Right", "focus-right"),
    (CONTAINER, "PageUp", "focus-page-up"),
    (CONTAINER, "PageDown", "focus-page-down"),
    (CONTAINER, "Home", "focus-begin"),
    (CONTAINER, "End", "focus-end"),
    (TEXTENTRY, "Right", "cursor-right"),
    (TEXTENTRY, "Left", "cursor-left"),
    (TEXTENTRY, "Down", "cursor-down"),
    (TEXTENTRY, "Up", "cursor-up"),
    (TEXTENTRY, "Ctrl-Right", "cursor-right-word"),
    (TEXTENTRY, "Ctrl-Left", "cursor-left-word"),
    (TEXTENTRY, "End", "cursor-end"),
    (TEXTENTRY, "Home", "cursor-begin"),
    (TEXTENTRY, "Delete", "delete-char"),
    (TEXTENTRY, "Backspace", "backspace"),
    (TEXTENTRY, "Alt-d", "delete-word-end"),
    (TEXTENTRY, "Ctrl-w", "delete-word-begin"),
    (TEXTENTRY, "Ctrl-k", "delete-line-end"),
    (TEXTENTRY, "Enter", "newline"),
    (TEXTENTRY, "Insert", "toggle-overwrite"),
    (BUTTON, "Enter", "activate"),
    (WINDOW, "Esc", "close-window"),
    (TOOLKIT, "Ctrl-l", "redraw-screen"),
];

/// A `HashMap`-backed binding table.
#[derive(Debug, Default, Clone)]
pub struct KeyMap {
    /// Actions by context, then by normalized key.
    contexts: HashMap<String, HashMap<Key, String>>,
}

impl KeyMap {
    /// An empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A key map holding the default bindings.
    pub fn with_defaults() -> Self {
        let mut km = Self::new();
        for (context, key, action) in DEFAULTS {
            if let Ok(key) = key.parse::<Key>() {
                km.bind(context, key, action);
            }
        }
        km
    }

    /// Bind `key` to `action` in `context`, replacing any previous binding.
    pub fn bind(&mut self, context: &str, key: Key, action: &str) {
        self.contexts
            .entry(context.into())
            .or_default()
            .insert(key.normalize(), action.into());
    }

    /// Apply bindings from configuration.
    pub fn load(&mut self, specs: &[BindingSpec]) -> Result<()> {
        for spec in specs {
            let key: Key = spec.key.parse()?;
            self.bind(&spec.context, key, &spec.action);
        }
        Ok(())
    }

    /// Remove a binding. Returns the action it was bound to.
    pub fn unbind(&mut self, context: &str, key: Key) -> Option<String> {
        self.contexts.get_mut(context)?.remove(&key.normalize())
    }
}

impl Bindings for KeyMap {
    fn lookup(&self, context: &str, key: &Key) -> Option<&str> {
        self.contexts
            .get(context)?
            .get(&key.normalize())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key::{Ctrl, KeyCode, Shift};

    #[test]
    fn defaults() {
        let km = KeyMap::with_defaults();
        assert_eq!(
            km.lookup(CONTAINER, &Key::from(KeyCode::Tab)),
            Some("focus-next")
        );
        assert_eq!(
            km.lookup(CONTAINER, &Key::from(KeyCode::BackTab)),
            Some("focus-previous")
        );
        assert_eq!(
            km.lookup(CONTAINER, &(Shift + KeyCode::Tab)),
            Some("focus-previous")
        );
        assert_eq!(km.lookup(TOOLKIT, &(Ctrl + 'l')), Some("redraw-screen"));
        assert_eq!(km.lookup(TEXTENTRY, &Key::from('a')), None);
        assert_eq!(km.lookup("nonesuch", &Key::from(KeyCode::Tab)), None);
    }

    #[test]
    fn load_overrides() -> Result<()> {
        let mut km = KeyMap::with_defaults();
        km.load(&[BindingSpec {
            context: CONTAINER.into(),
            key: "Tab".into(),
            action: "focus-down".into(),
        }])?;
        assert_eq!(
            km.lookup(CONTAINER, &Key::from(KeyCode::Tab)),
            Some("focus-down")
        );
        assert!(
            km.load(&[BindingSpec {
                context: CONTAINER.into(),
                key: "Nope".into(),
                action: "x".into(),
            }])
            .is_err()
        );
        assert_eq!(
            km.unbind(CONTAINER, KeyCode::Tab.into()),
            Some("focus-down".into())
        );
        Ok(())
    }
}
