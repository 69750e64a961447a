#![allow(clippy::new_without_default)]
//! Core types and services of the toolkit.

/// Terminal drivers.
pub mod backend;
/// Window registry and frame composition.
pub mod compositor;
/// Toolkit configuration.
pub mod config;
/// The context handed to widget callbacks.
pub mod context;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Focus chains and focus motion.
pub mod focus;
/// Size negotiation and child placement.
pub mod geometry;
/// Node ID types.
pub mod id;
/// Key bindings.
pub mod keymap;
/// File logging.
pub mod logging;
/// Node data and construction options.
pub mod node;
/// Rendering interfaces.
pub mod render;
/// Typed event channels.
pub mod signal;
/// Shared node name types.
pub mod state;
/// Styling and color helpers.
pub mod style;
/// Terminal buffer types.
pub mod termbuf;
/// Testing utilities.
pub mod testing;
/// Character widths and display substitutions.
pub mod text;
/// The toolkit entry point.
pub mod toolkit;
/// The widget arena.
pub mod world;

pub use context::Context;
pub use id::{NodeId, TypedId};
pub use toolkit::Toolkit;
pub use world::Core;
