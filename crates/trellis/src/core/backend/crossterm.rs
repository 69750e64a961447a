use std::{
    io::{self, Stderr, Write},
    panic,
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::guard;

use super::{BackendControl, TerminalSession};
use crate::{
    compositor::WindowManager,
    error::{Error, Result},
    event::{Event, key},
    geom::{Expanse, Point},
    logging,
    render::RenderBackend,
    style::{Color, Style},
    toolkit::Toolkit,
};

/// Translate a toolkit color into a crossterm color.
fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Black => style::Color::Black,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Yellow => style::Color::Yellow,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Magenta => style::Color::Magenta,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::Cyan,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
        Color::AnsiValue(a) => style::Color::AnsiValue(a),
    }
}

/// Map IO errors into render errors.
fn translate_result<T>(e: io::Result<T>) -> Result<T> {
    e.map_err(|e| Error::Render(e.to_string()))
}

/// Leave raw mode and the alternate screen.
fn restore_terminal(fp: &mut Stderr) -> io::Result<()> {
    fp.execute(ccursor::Show)?;
    fp.execute(terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Switches the terminal in and out of raw mode on the alternate screen.
#[derive(Debug)]
pub struct CrosstermControl {
    /// Stderr handle used for control output.
    fp: Stderr,
}

impl Default for CrosstermControl {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl BackendControl for CrosstermControl {
    fn start(&mut self) -> Result<()> {
        translate_result((|| {
            terminal::enable_raw_mode()?;
            self.fp.execute(terminal::EnterAlternateScreen)?;
            self.fp.execute(ccursor::Hide)?;
            Ok(())
        })())
    }

    fn stop(&mut self) -> Result<()> {
        translate_result(restore_terminal(&mut self.fp))
    }
}

/// A render backend writing to stderr through crossterm.
#[derive(Debug)]
pub struct CrosstermRender {
    /// Stderr handle used for rendering output.
    fp: Stderr,
}

impl Default for CrosstermRender {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl CrosstermRender {
    /// Apply a style to subsequent output.
    fn apply_style(&mut self, s: &Style) -> io::Result<()> {
        // Reset clears colours too, so it has to come first.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.fp
            .queue(style::SetForegroundColor(translate_color(s.fg)))?;
        self.fp
            .queue(style::SetBackgroundColor(translate_color(s.bg)))?;
        let attrs = [
            (s.attrs.bold, style::Attribute::Bold),
            (s.attrs.crossedout, style::Attribute::CrossedOut),
            (s.attrs.dim, style::Attribute::Dim),
            (s.attrs.italic, style::Attribute::Italic),
            (s.attrs.overline, style::Attribute::OverLined),
            (s.attrs.underline, style::Attribute::Underlined),
        ];
        for (on, attr) in attrs {
            if on {
                self.fp.queue(style::SetAttribute(attr))?;
            }
        }
        Ok(())
    }
}

impl RenderBackend for CrosstermRender {
    fn style(&mut self, s: &Style) -> Result<()> {
        translate_result(self.apply_style(s))
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        translate_result((|| {
            self.fp
                .queue(ccursor::MoveTo(loc.x as u16, loc.y as u16))?;
            self.fp.queue(style::Print(txt))?;
            Ok(())
        })())
    }

    fn clear(&mut self) -> Result<()> {
        translate_result(
            self.fp
                .queue(terminal::Clear(terminal::ClearType::All))
                .map(|_| ()),
        )
    }

    fn flush(&mut self) -> Result<()> {
        translate_result(self.fp.flush())
    }
}

/// Translate crossterm key modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm key code. Keys the toolkit has no name for are
/// dropped.
fn translate_key_code(code: cevent::KeyCode) -> Option<key::KeyCode> {
    Some(match code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        _ => return None,
    })
}

/// Translate a crossterm event. Key releases, mouse and focus reports are
/// dropped.
fn translate_event(e: cevent::Event) -> Option<Event> {
    match e {
        cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
            Some(Event::Key(key::Key {
                mods: translate_key_modifiers(k.modifiers),
                code: translate_key_code(k.code)?,
            }))
        }
        cevent::Event::Resize(x, y) => Some(Event::Resize(Expanse::new(x.into(), y.into()))),
        cevent::Event::Paste(s) => Some(Event::Text(s)),
        _ => None,
    }
}

/// Is this the key that always quits the runloop?
fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key::Key {
            code: key::KeyCode::Char('c'),
            mods: key::Mods { ctrl: true, .. },
        })
    )
}

/// Run the render/event loop on the controlling terminal until the last
/// window closes or Ctrl-c is pressed.
///
/// File logging is started here if the toolkit's configuration asks for it.
/// The terminal is restored on every exit path, including panics.
pub fn runloop(mut tk: Toolkit) -> Result<()> {
    if let Some(log) = &tk.config().log {
        logging::init_logging(log)?;
    }
    let mut session = TerminalSession::new(CrosstermControl::default())?;

    let previous = panic::take_hook();
    panic::set_hook(Box::new(|pi| {
        if restore_terminal(&mut io::stderr()).is_err() {
            tracing::error!("failed to restore the terminal");
        }
        eprintln!("{pi}");
    }));
    let _hook = guard(previous, |hook| {
        drop(panic::take_hook());
        panic::set_hook(hook);
    });

    let mut be = CrosstermRender::default();
    let (w, h) = translate_result(terminal::size())?;
    tk.resize(Expanse::new(w.into(), h.into()));
    tracing::info!(w, h, "runloop started");

    while !tk.core().windows().is_empty() {
        tk.render(&mut be)?;
        let Some(event) = translate_event(translate_result(cevent::read())?) else {
            continue;
        };
        if is_interrupt(&event) {
            break;
        }
        tk.dispatch(event)?;
    }
    session.stop()?;
    tracing::info!("runloop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key::{Ctrl, KeyCode};

    #[test]
    fn events() {
        let press = cevent::Event::Key(cevent::KeyEvent::new(
            cevent::KeyCode::Char('l'),
            cevent::KeyModifiers::CONTROL,
        ));
        assert_eq!(translate_event(press), Some(Event::Key(Ctrl + 'l')));

        let mut release = cevent::KeyEvent::new(cevent::KeyCode::Tab, cevent::KeyModifiers::NONE);
        release.kind = cevent::KeyEventKind::Release;
        assert_eq!(translate_event(cevent::Event::Key(release)), None);

        assert_eq!(
            translate_event(cevent::Event::Resize(80, 24)),
            Some(Event::Resize(Expanse::new(80, 24)))
        );
        assert_eq!(
            translate_event(cevent::Event::Paste("hi".into())),
            Some(Event::Text("hi".into()))
        );
        assert_eq!(translate_key_code(cevent::KeyCode::CapsLock), None);
        assert_eq!(
            translate_key_code(cevent::KeyCode::BackTab),
            Some(KeyCode::BackTab)
        );
        assert!(is_interrupt(&Event::Key(Ctrl + 'c')));
    }
}
