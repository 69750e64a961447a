//! Helpers for testing widgets and toolkits: an in-memory backend and buffer
//! assertions.

/// In-memory render backend.
pub mod backend;
/// Buffer testing utilities.
pub mod buf;

pub use backend::TestRender;
pub use buf::BufTest;
