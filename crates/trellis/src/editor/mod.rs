//! Text storage and wrapping used by the text edit widget.

/// Editable text with a wrapped row cache.
pub mod buffer;
/// Gap-buffer character storage.
pub mod gap;
/// Width-aware row wrapping.
pub mod wrap;

pub use buffer::{CursorPosition, DeleteExtent, Direction, Granularity, TextBuffer};
pub use gap::{DEFAULT_GAP_SIZE, GapBuffer};
pub use wrap::ScreenLine;
