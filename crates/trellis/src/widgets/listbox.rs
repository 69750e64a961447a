//! Stacking list container.

use crate::{
    core::node::ContainerConfig,
    geometry::Arrangement,
    state::NodeName,
    widget::Widget,
};

/// A container that stacks its visible children in a column or a row.
///
/// The list box itself draws nothing. Placement is done by the core from the
/// container options, so add it with the options returned by
/// [`ListBox::config`]:
///
/// ```
/// use trellis::{Core, widgets::ListBox};
///
/// let mut core = Core::new();
/// let list = ListBox::vertical();
/// let cfg = list.config();
/// let id = core.add_container(list, cfg);
/// assert!(core.node(id).is_some_and(|n| n.is_container()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ListBox {
    /// Stacking direction.
    arrangement: Arrangement,
}

impl ListBox {
    /// A list box stacking top to bottom.
    pub fn vertical() -> Self {
        Self {
            arrangement: Arrangement::Vertical,
        }
    }

    /// A list box stacking left to right.
    pub fn horizontal() -> Self {
        Self {
            arrangement: Arrangement::Horizontal,
        }
    }

    /// Container options for this list box.
    pub fn config(&self) -> ContainerConfig {
        let cfg = ContainerConfig::new();
        match self.arrangement {
            Arrangement::Horizontal => cfg.horizontal(),
            _ => cfg.vertical(),
        }
    }
}

impl Widget for ListBox {
    fn name(&self) -> NodeName {
        NodeName::convert("list_box")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compositor::{WindowConfig, WindowManager},
        core::{node::NodeConfig, world::Core},
        error::Result,
        geom::{Expanse, Rect},
        widgets::{Label, Separator, Window},
    };

    #[test]
    fn stacks_labels() -> Result<()> {
        let mut core = Core::new();
        core.resize(Expanse::new(10, 6));
        let win = core.add_window(Window::new(), WindowConfig::new())?;
        let list = ListBox::vertical();
        let cfg = list.config().node(NodeConfig::new().size(10, 6));
        let list = core.add_container(list, cfg);
        core.attach(win, list)?;
        let a = core.add(Label::new("one"), NodeConfig::new());
        let sep = core.add(Separator, NodeConfig::new());
        let b = core.add(Label::new("two\nlines"), NodeConfig::new());
        for id in [a.id(), sep.id(), b.id()] {
            core.attach(list, id)?;
        }
        assert_eq!(core.real(a), Some(Rect::new(0, 0, 3, 1)));
        assert_eq!(core.real(sep), Some(Rect::new(0, 1, 10, 1)));
        assert_eq!(core.real(b), Some(Rect::new(0, 2, 5, 2)));
        Ok(())
    }
}
