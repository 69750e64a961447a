//! Convenience re-exports for common toolkit types.

pub use crate::{
    Context, Core, NodeId, Toolkit, TypedId, Widget, error,
    compositor::{WindowConfig, WindowManager, WindowType},
    config::Config,
    event::{Event, key::Key},
    focus::{FocusDirection, FocusManager},
    geom::{Expanse, Point, Rect},
    geometry::{Arrangement, Extent, SizeRequest},
    node::{ContainerConfig, FocusCycle, NodeConfig},
    render::Render,
    state::NodeName,
    widget::{DrawContext, EventOutcome},
};

/// Common result alias for toolkit operations.
pub type Result<T> = error::Result<T>;
