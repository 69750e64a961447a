use std::{io, result::Result as StdResult};

use thiserror::Error;

use super::id::NodeId;
use crate::geom;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Only `Render` failures are expected in correct programs: a widget whose
/// draw fails loses that frame, and the rest of the screen is still drawn.
/// Structural variants flag misuse of the tree API.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("render: {0}")]
    /// A drawing primitive could not be satisfied.
    Render(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("focus: {0}")]
    /// Focus operation issued against an unsuitable node.
    Focus(String),
    #[error("node not found: {0:?}")]
    /// The node does not exist in the arena.
    NodeNotFound(NodeId),
    #[error("node already attached: {0:?}")]
    /// The node already has a parent.
    AlreadyAttached(NodeId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Attaching would make a node its own ancestor.
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
    #[error("not a container: {0:?}")]
    /// A container operation was issued on a leaf.
    NotAContainer(NodeId),
    #[error("not a window: {0:?}")]
    /// A window operation was issued on a node that is not a registered window.
    NotAWindow(NodeId),
    #[error("widget is already borrowed: {0:?}")]
    /// A widget was reached again while one of its own callbacks was running.
    ReentrantWidgetBorrow(NodeId),
    #[error("config: {0}")]
    /// Configuration could not be loaded or applied.
    Config(String),
    #[error("parse: {0}")]
    /// A key or binding specification could not be parsed.
    Parse(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
