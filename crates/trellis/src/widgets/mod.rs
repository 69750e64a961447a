//! Built-in widgets.

/// Button widget.
pub mod button;
/// Label widget.
pub mod label;
/// Stacking list container.
pub mod listbox;
/// Separator widget.
pub mod separator;
/// Text edit widget.
pub mod textedit;
/// Window root widget.
pub mod window;

pub use button::Button;
pub use label::Label;
pub use listbox::ListBox;
pub use separator::Separator;
pub use textedit::{InputFilter, TextEdit};
pub use window::Window;
