//! Decoded keyboard input and the textual key syntax used in bindings.
use std::{fmt, ops::Add, str::FromStr};

use crate::error::{Error, Result};

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, code: KeyCode) -> Self::Output {
        Key { mods: self, code }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            code: other.into(),
        }
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift-only modifier state.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Control-only modifier state.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt-only modifier state.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// Logical key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Shift + Tab, as some terminals report it.
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// Function key, `F(1)` being F1.
    F(u8),
    /// A character.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// Names of the non-character keys, as written in bindings.
const NAMES: &[(&str, KeyCode)] = &[
    ("Backspace", KeyCode::Backspace),
    ("Enter", KeyCode::Enter),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Tab", KeyCode::Tab),
    ("BackTab", KeyCode::BackTab),
    ("Delete", KeyCode::Delete),
    ("Insert", KeyCode::Insert),
    ("Esc", KeyCode::Esc),
    ("Space", KeyCode::Char(' ')),
];

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMES.iter().find(|(_, c)| c == self) {
            return f.write_str(name);
        }
        match self {
            Self::F(n) => write!(f, "F{n}"),
            Self::Char(c) => write!(f, "{c}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl FromStr for KeyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((_, code)) = NAMES.iter().find(|(name, _)| *name == s) {
            return Ok(*code);
        }
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }
        if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            return Ok(Self::F(n));
        }
        Err(Error::Parse(format!("unknown key: {s:?}")))
    }
}

/// A keystroke along with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// Key code.
    pub code: KeyCode,
}

impl Key {
    /// Normalise a key for binding lookup.
    ///
    /// Terminals report a shifted letter as both the shift modifier and the
    /// uppercase character, while bindings name just the character. So shift
    /// is folded into characters: lowercase letters become uppercase and
    /// other characters simply drop the shift, except space, which keeps it.
    /// `BackTab` becomes `Shift-Tab`.
    ///
    /// | input             | normalization    |
    /// |-------------------|------------------|
    /// | shift + a         | A                |
    /// | shift + )         | )                |
    /// | shift + space     | shift + space    |
    /// | backtab           | shift + tab      |
    pub fn normalize(&self) -> Self {
        let unshifted = Mods {
            shift: false,
            ..self.mods
        };
        match self.code {
            KeyCode::BackTab => Self {
                mods: self.mods + Shift,
                code: KeyCode::Tab,
            },
            KeyCode::Char(' ') => *self,
            KeyCode::Char(c) if self.mods.shift => Self {
                mods: unshifted,
                code: KeyCode::Char(c.to_ascii_uppercase()),
            },
            _ => *self,
        }
    }

    /// The character this key types, if it is plain printable text.
    pub fn text(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.ctrl && !self.mods.alt && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.ctrl {
            f.write_str("Ctrl-")?;
        }
        if self.mods.alt {
            f.write_str("Alt-")?;
        }
        if self.mods.shift {
            f.write_str("Shift-")?;
        }
        write!(f, "{}", self.code)
    }
}

/// Parse the binding syntax: any of `Ctrl-`, `Alt-` and `Shift-` followed by a
/// key name or a single character, e.g. `Shift-Tab` or `Ctrl-l`.
impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut mods = Empty;
        let mut rest = s;
        loop {
            let (flag, tail) = if let Some(t) = rest.strip_prefix("Ctrl-") {
                (Ctrl, t)
            } else if let Some(t) = rest.strip_prefix("Alt-") {
                (Alt, t)
            } else if let Some(t) = rest.strip_prefix("Shift-") {
                (Shift, t)
            } else {
                break;
            };
            if tail.is_empty() {
                break;
            }
            mods = mods + flag;
            rest = tail;
        }
        Ok(Self {
            mods,
            code: rest.parse()?,
        })
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, c: &KeyCode) -> bool {
        self.mods == Empty && *c == self.code
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self {
            mods: Empty,
            code: KeyCode::Char(c),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(c: KeyCode) -> Self {
        Self {
            mods: Empty,
            code: c,
        }
    }
}
