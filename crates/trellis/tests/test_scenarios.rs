//! End-to-end checks of focus routing and text wrapping on small trees.

#[cfg(test)]
mod tests {
    use trellis::{
        Core, NodeId,
        compositor::{WindowConfig, WindowManager},
        editor::TextBuffer,
        error::Result,
        focus::{FocusDirection, FocusManager},
        geom::Expanse,
        node::NodeConfig,
        widget::Widget,
        widgets::Window,
    };

    /// A leaf with no behaviour of its own.
    struct Leaf;

    impl Widget for Leaf {}

    /// A window holding leaves A (not focusable), B and C (focusable).
    fn abc() -> Result<(Core, NodeId, [NodeId; 3])> {
        let mut core = Core::new();
        core.resize(Expanse::new(20, 5));
        let win = core.add_window(Window::new(), WindowConfig::new())?.id();
        let a = core.add(Leaf, NodeConfig::new().at(0, 0).size(5, 1)).id();
        let b = core
            .add(Leaf, NodeConfig::new().at(0, 1).size(5, 1).focusable())
            .id();
        let c = core
            .add(Leaf, NodeConfig::new().at(0, 2).size(5, 1).focusable())
            .id();
        for id in [a, b, c] {
            core.attach(win, id)?;
        }
        Ok((core, win, [a, b, c]))
    }

    fn has_focus(core: &Core, id: NodeId) -> bool {
        core.node(id).is_some_and(|n| n.has_focus())
    }

    #[test]
    fn next_skips_unfocusable() -> Result<()> {
        let (mut core, win, [_, b, _]) = abc()?;
        assert_eq!(core.focused_widget(win), None);
        assert!(core.move_focus(win, FocusDirection::Next)?);
        assert_eq!(core.focused_widget(win), Some(b));
        assert!(has_focus(&core, b));
        Ok(())
    }

    #[test]
    fn next_wraps_to_first_focusable() -> Result<()> {
        let (mut core, win, [a, b, c]) = abc()?;
        core.grab_focus(c)?;
        assert!(core.move_focus(win, FocusDirection::Next)?);
        assert_eq!(core.focused_widget(win), Some(b));
        assert!(!has_focus(&core, a));
        assert!(!has_focus(&core, c));
        Ok(())
    }

    #[test]
    fn insert_newline_into_empty_buffer() {
        let mut buf = TextBuffer::new("").wrapped(10);
        buf.insert("ab\n");
        let lines = buf.lines().to_vec();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].start, lines[0].length), (0, 2));
        assert!(lines[0].has_newline());
        assert_eq!((lines[1].start, lines[1].length), (3, 0));
    }

    #[test]
    fn unbroken_word_is_hard_wrapped() {
        let mut buf = TextBuffer::new("wordword").wrapped(4);
        let lengths: Vec<usize> = buf.lines().iter().map(|l| l.length).collect();
        assert_eq!(lengths, vec![4, 4]);
        assert_eq!(buf.line_text(1).as_deref(), Some("word"));
    }

    #[test]
    fn hidden_focus_is_repaired() -> Result<()> {
        let (mut core, win, [_, b, c]) = abc()?;
        core.grab_focus(b)?;
        core.set_visible(b, false)?;
        core.move_focus(win, FocusDirection::Next)?;
        assert_eq!(core.focused_widget(win), Some(c));
        assert!(!has_focus(&core, b));
        assert!(has_focus(&core, c));
        Ok(())
    }
}
