//! Input events handed to the toolkit by the terminal driver.

pub mod key;

use crate::geom::Expanse;

/// A decoded input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(key::Key),
    /// A fragment of raw text, such as a paste.
    Text(String),
    /// The terminal changed size.
    Resize(Expanse),
}

impl From<key::Key> for Event {
    fn from(k: key::Key) -> Self {
        Self::Key(k)
    }
}
