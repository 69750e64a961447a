//! Trellis: the core of a terminal widget toolkit.
//!
//! Widgets live in an arena of nodes arranged in trees, one tree per window.
//! The toolkit negotiates sizes between parents and children, routes keyboard
//! focus through each window's containers, edits wrapped text in a gap buffer
//! and composites the windows onto a character-cell screen.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Toolkit`] - Owns the arena and services, dispatches input and renders
//! - [`Core`] - The widget arena and layout engine
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, etc.)
//! - [`editor`] - Gap buffer and wrapped text storage
//! - [`widgets`] - Built-in widget implementations

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub mod editor;
pub mod prelude;
pub mod widget;
pub mod widgets;

pub use geom;

// Re-export core application types
pub use core::{Context, Core, NodeId, Toolkit, TypedId};
// Re-export core submodules
pub use core::{
    backend, compositor, config, context, error, event, focus, geometry, id, keymap, logging,
    node, render, signal, state, style, termbuf, testing, text, toolkit, world,
};

// Re-export widget trait and event outcome
pub use widget::{EventOutcome, Widget};
