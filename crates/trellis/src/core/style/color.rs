use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A terminal color value.
///
/// Colors are written in configuration as a name (`"dark-grey"`), a palette
/// index (`"208"`) or an RGB triple (`"#ff8800"`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// Black.
    Black,
    /// Dark grey.
    DarkGrey,
    /// Red.
    Red,
    /// Dark red.
    DarkRed,
    /// Green.
    Green,
    /// Dark green.
    DarkGreen,
    /// Yellow.
    Yellow,
    /// Dark yellow.
    DarkYellow,
    /// Blue.
    Blue,
    /// Dark blue.
    DarkBlue,
    /// Magenta.
    Magenta,
    /// Dark magenta.
    DarkMagenta,
    /// Cyan.
    Cyan,
    /// Dark cyan.
    DarkCyan,
    /// White.
    White,
    /// Grey.
    Grey,
    /// RGB color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
    /// An entry in the 256-colour palette.
    AnsiValue(u8),
}

/// Named colors and their configuration spellings.
const NAMES: [(&str, Color); 16] = [
    ("black", Color::Black),
    ("dark-grey", Color::DarkGrey),
    ("red", Color::Red),
    ("dark-red", Color::DarkRed),
    ("green", Color::Green),
    ("dark-green", Color::DarkGreen),
    ("yellow", Color::Yellow),
    ("dark-yellow", Color::DarkYellow),
    ("blue", Color::Blue),
    ("dark-blue", Color::DarkBlue),
    ("magenta", Color::Magenta),
    ("dark-magenta", Color::DarkMagenta),
    ("cyan", Color::Cyan),
    ("dark-cyan", Color::DarkCyan),
    ("white", Color::White),
    ("grey", Color::Grey),
];

impl Color {
    /// Parse a hex RGB string, "#RRGGBB" or "RRGGBB".
    pub fn rgb(hex: &str) -> Result<Self> {
        let hex = hex.trim_start_matches('#');
        let bad = || Error::Parse(format!("invalid hex color: {hex}"));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::rgb(s);
        }
        if let Ok(n) = s.parse::<u8>() {
            return Ok(Self::AnsiValue(n));
        }
        let name = s.to_ascii_lowercase().replace(['_', ' '], "-");
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .ok_or_else(|| Error::Parse(format!("unknown color: {s}")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::AnsiValue(n) => write!(f, "{n}"),
            named => {
                let name = NAMES
                    .iter()
                    .find(|(_, c)| c == named)
                    .map_or("?", |(n, _)| n);
                f.write_str(name)
            }
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}
