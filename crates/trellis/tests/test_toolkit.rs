//! Input dispatch and rendering through the toolkit entry point.

#[cfg(test)]
mod tests {
    use trellis::{
        Context, EventOutcome, Toolkit, TypedId, Widget,
        compositor::{WindowConfig, WindowManager, WindowType},
        config::Config,
        error::Result,
        event::{
            Event,
            key::{Ctrl, Key, KeyCode, Shift},
        },
        focus::FocusManager,
        geom::Expanse,
        keymap,
        node::{ContainerConfig, NodeConfig},
        testing::TestRender,
        widgets::{Button, Label, ListBox, TextEdit, Window},
    };

    /// A dialog: a bordered window with a text edit above two buttons.
    struct Dialog {
        win: TypedId<Window>,
        edit: TypedId<TextEdit>,
        ok: TypedId<Button>,
        cancel: TypedId<Button>,
    }

    fn dialog(tk: &mut Toolkit) -> Result<Dialog> {
        let edit = tk.text_edit("");
        let win = tk.add_window(
            Window::new().with_title("ask"),
            WindowConfig::new()
                .container(ContainerConfig::new().vertical().border(1))
                .size(20, 6),
        )?;
        let core = tk.core_mut();
        let edit = core.add(edit, NodeConfig::new().size(18, 2));
        let row = ListBox::horizontal();
        let cfg = row.config();
        let row = core.add_container(row, cfg);
        let ok = core.add(Button::new("ok"), NodeConfig::new());
        let cancel = core.add(Button::new("cancel"), NodeConfig::new());
        core.attach(win, edit)?;
        core.attach(win, row)?;
        core.attach(row, ok)?;
        core.attach(row, cancel)?;
        tk.focus_window();
        Ok(Dialog {
            win,
            edit,
            ok,
            cancel,
        })
    }

    /// A button-like leaf whose action closes its own window, then declines
    /// the key.
    struct Closer;

    impl Widget for Closer {
        fn on_action(&mut self, action: &str, ctx: &mut dyn Context) -> Result<EventOutcome> {
            if action == "activate" {
                ctx.close_window()?;
            }
            Ok(EventOutcome::Ignore)
        }

        fn accept_focus(&self) -> bool {
            true
        }

        fn contexts(&self) -> &'static [&'static str] {
            &[keymap::BUTTON]
        }
    }

    fn toolkit(w: u32, h: u32) -> Result<Toolkit> {
        let mut tk = Toolkit::new(Config::default())?;
        tk.resize(Expanse::new(w, h));
        Ok(tk)
    }

    fn key(k: impl Into<Key>) -> Event {
        Event::Key(k.into())
    }

    #[test]
    fn tab_cycles_focus() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let d = dialog(&mut tk)?;
        let focused = |tk: &Toolkit| tk.core().focused_widget(d.win.id());
        assert_eq!(focused(&tk), Some(d.edit.id()));

        assert!(tk.dispatch(key(KeyCode::Tab))?);
        assert_eq!(focused(&tk), Some(d.ok.id()));
        assert!(tk.dispatch(key(KeyCode::Tab))?);
        assert_eq!(focused(&tk), Some(d.cancel.id()));
        assert!(tk.dispatch(key(KeyCode::Tab))?);
        assert_eq!(focused(&tk), Some(d.edit.id()));
        assert!(tk.dispatch(key(Shift + KeyCode::Tab))?);
        assert_eq!(focused(&tk), Some(d.cancel.id()));
        assert!(tk.dispatch(key(KeyCode::BackTab))?);
        assert_eq!(focused(&tk), Some(d.ok.id()));
        Ok(())
    }

    #[test]
    fn typing_reaches_text_edit() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let d = dialog(&mut tk)?;
        let rx = tk.core_mut().with_widget(d.edit, |t, _| t.subscribe())?;
        for c in "hey".chars() {
            assert!(tk.dispatch(key(c))?);
        }
        assert!(tk.dispatch(key(KeyCode::Backspace))?);
        assert!(tk.dispatch(Event::Text(" you".into()))?);
        let text = tk.core_mut().with_widget(d.edit, |t, _| t.text())?;
        assert_eq!(text, "he you");
        assert_eq!(rx.try_iter().last().as_deref(), Some("he you"));
        Ok(())
    }

    #[test]
    fn unmoved_cursor_key_moves_focus() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let d = dialog(&mut tk)?;
        // The edit holds one row, so Down cannot move the cursor and the key
        // falls through to the container's focus binding.
        assert!(tk.dispatch(key(KeyCode::Down))?);
        assert_eq!(tk.core().focused_widget(d.win.id()), Some(d.ok.id()));
        Ok(())
    }

    #[test]
    fn enter_activates_button() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let d = dialog(&mut tk)?;
        let rx = tk.core_mut().with_widget(d.ok, |b, _| b.subscribe())?;
        tk.dispatch(key(KeyCode::Tab))?;
        assert!(tk.dispatch(key(KeyCode::Enter))?);
        assert!(tk.dispatch(key(KeyCode::Enter))?);
        assert_eq!(rx.try_iter().count(), 2);
        Ok(())
    }

    #[test]
    fn escape_closes_window() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let back = tk.add_window(Label::new("back"), WindowConfig::new())?;
        let d = dialog(&mut tk)?;
        assert_eq!(tk.core().active_window(), Some(d.win.id()));

        assert!(tk.dispatch(key(KeyCode::Esc))?);
        assert!(!tk.core().contains(d.win));
        assert!(!tk.core().contains(d.ok));
        assert_eq!(tk.core().windows(), vec![back.id()]);
        assert_eq!(tk.core().active_window(), Some(back.id()));
        Ok(())
    }

    #[test]
    fn handler_closing_its_own_window() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let back = tk.add_window(Window::new(), WindowConfig::new())?;
        let popup = tk.add_window(Window::new(), WindowConfig::new().at(2, 2).size(10, 3))?;
        let closer = tk.core_mut().add(Closer, NodeConfig::new());
        tk.core_mut().attach(popup, closer)?;
        tk.focus_window();
        assert_eq!(tk.core().focused_widget(popup.id()), Some(closer.id()));

        assert!(!tk.dispatch(key(KeyCode::Enter))?);
        assert!(!tk.core().contains(popup));
        assert!(!tk.core().contains(closer));
        assert_eq!(tk.core().windows(), vec![back.id()]);
        assert_eq!(tk.core().active_window(), Some(back.id()));

        assert!(tk.dispatch(key(KeyCode::Tab))?);
        let mut be = TestRender::new(Expanse::new(30, 10));
        assert!(tk.render(&mut be)?);
        Ok(())
    }

    #[test]
    fn top_window_takes_input() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        let d = dialog(&mut tk)?;
        let top = tk.add_window(
            Window::new(),
            WindowConfig::new().kind(WindowType::Top).at(0, 8).size(10, 1),
        )?;
        let b = tk.core_mut().add(Button::new("x"), NodeConfig::new());
        tk.core_mut().attach(top, b)?;
        tk.focus_window();
        assert_eq!(tk.core().active_window(), Some(top.id()));

        tk.raise_window(d.win)?;
        assert_eq!(tk.core().active_window(), Some(top.id()));
        assert!(!tk.core().node(d.edit).is_some_and(|n| n.has_focus()));
        Ok(())
    }

    #[test]
    fn render_and_redraw() -> Result<()> {
        let mut tk = toolkit(30, 10)?;
        dialog(&mut tk)?;
        let mut be = TestRender::new(Expanse::new(30, 10));

        assert!(tk.render(&mut be)?);
        assert_eq!(be.clears, 1);
        assert!(be.contains_text("┌─ask"));
        assert!(be.contains_text("[ok][cancel]"));
        assert!(!tk.render(&mut be)?);

        for c in "hi".chars() {
            tk.dispatch(key(c))?;
        }
        let writes = be.writes;
        assert!(tk.render(&mut be)?);
        assert_eq!(be.clears, 1);
        assert!(be.writes > writes);
        assert!(be.contains_text("│hi"));

        assert!(tk.dispatch(key(Ctrl + 'l'))?);
        assert!(tk.render(&mut be)?);
        assert_eq!(be.clears, 2);
        assert!(be.contains_text("│hi"));
        Ok(())
    }

    #[test]
    fn configured_bindings_apply() -> Result<()> {
        let cfg = Config::from_json(
            r#"{"bindings": [{"context": "button", "key": "Space", "action": "activate"}]}"#,
        )?;
        let mut tk = Toolkit::new(cfg)?;
        tk.resize(Expanse::new(30, 10));
        let d = dialog(&mut tk)?;
        let rx = tk.core_mut().with_widget(d.cancel, |b, _| b.subscribe())?;
        tk.core_mut().grab_focus(d.cancel.id())?;
        assert!(tk.dispatch(key(' '))?);
        assert_eq!(rx.try_iter().count(), 1);
        Ok(())
    }
}
