/// Color values.
mod color;

use std::collections::{HashMap, HashSet};

pub use color::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A text attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attr {
    /// Bold text.
    Bold,
    /// Crossed out text.
    CrossedOut,
    /// Dim text.
    Dim,
    /// Italic text.
    Italic,
    /// Overlined text.
    Overline,
    /// Underlined text.
    Underline,
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttrSet {
    /// Bold flag.
    pub bold: bool,
    /// Crossed out flag.
    pub crossedout: bool,
    /// Dim flag.
    pub dim: bool,
    /// Italic flag.
    pub italic: bool,
    /// Overline flag.
    pub overline: bool,
    /// Underline flag.
    pub underline: bool,
}

impl AttrSet {
    /// Construct a set of text attributes with a single attribute turned on.
    pub fn new(attr: Attr) -> Self {
        Self::default().with(attr)
    }

    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A helper for progressive construction of attribute sets.
    pub fn with(mut self, attr: Attr) -> Self {
        match attr {
            Attr::Bold => self.bold = true,
            Attr::Dim => self.dim = true,
            Attr::Italic => self.italic = true,
            Attr::CrossedOut => self.crossedout = true,
            Attr::Underline => self.underline = true,
            Attr::Overline => self.overline = true,
        };
        self
    }
}

/// A fully resolved style.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text attributes.
    pub attrs: AttrSet,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            attrs: AttrSet::default(),
        }
    }
}

impl Style {
    /// The same style with foreground and background swapped.
    pub fn reversed(&self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
            attrs: self.attrs,
        }
    }
}

/// A possibly partial style, as stored in a [`StyleMap`]. Missing fields are
/// inherited from parent paths during resolution.
#[derive(Default, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialStyle {
    /// Optional foreground color.
    pub fg: Option<Color>,
    /// Optional background color.
    pub bg: Option<Color>,
    /// Optional attributes.
    pub attrs: Option<AttrSet>,
}

impl PartialStyle {
    /// A partial style setting only the foreground.
    pub fn fg(fg: Color) -> Self {
        Self {
            fg: Some(fg),
            ..Default::default()
        }
    }

    /// A partial style setting only the background.
    pub fn bg(bg: Color) -> Self {
        Self {
            bg: Some(bg),
            ..Default::default()
        }
    }

    /// Set the background.
    pub fn with_bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add an attribute.
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default().with(attr));
        self
    }

    /// Fill fields we lack from `other`.
    pub fn join(&self, other: &Self) -> Self {
        Self {
            fg: self.fg.or(other.fg),
            bg: self.bg.or(other.bg),
            attrs: self.attrs.or(other.attrs),
        }
    }

    /// Are all fields set?
    pub fn is_complete(&self) -> bool {
        self.fg.is_some() && self.bg.is_some() && self.attrs.is_some()
    }

    /// Resolve to a full style, with defaults for missing fields.
    pub fn resolve(&self) -> Style {
        let d = Style::default();
        Style {
            fg: self.fg.unwrap_or(d.fg),
            bg: self.bg.unwrap_or(d.bg),
            attrs: self.attrs.unwrap_or(d.attrs),
        }
    }
}

/// Split a style path into components.
fn parse_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// The style table service. Styles are named by slash-separated paths like
/// `textedit/cursor`; a lookup falls back along the path towards the root
/// for any field the specific path leaves unset.
#[derive(Debug, Clone)]
pub struct StyleMap {
    /// Path-to-style map.
    styles: HashMap<Vec<String>, PartialStyle>,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleMap {
    /// Construct a style map with the toolkit's default styles.
    pub fn new() -> Self {
        let mut sm = Self {
            styles: HashMap::new(),
        };
        sm.set(
            "/",
            PartialStyle {
                fg: Some(Color::White),
                bg: Some(Color::Black),
                attrs: Some(AttrSet::default()),
            },
        );
        sm.set("window/border", PartialStyle::fg(Color::Cyan));
        sm.set(
            "window/marker",
            PartialStyle::fg(Color::Yellow).with_attr(Attr::Bold),
        );
        sm.set(
            "button/focus",
            PartialStyle::fg(Color::Black).with_bg(Color::Cyan),
        );
        sm.set(
            "textedit/cursor",
            PartialStyle::fg(Color::Black).with_bg(Color::White),
        );
        sm.set("separator", PartialStyle::fg(Color::DarkGrey));
        sm
    }

    /// Set the style at a path, replacing what was there.
    pub fn set(&mut self, path: &str, style: PartialStyle) {
        self.styles.insert(parse_path(path), style);
    }

    /// Layer configured styles over the table. Each entry is joined onto
    /// whatever the path already holds, so unset fields keep their value.
    pub fn extend<'a>(&mut self, styles: impl IntoIterator<Item = (&'a String, &'a PartialStyle)>) {
        for (path, style) in styles {
            let key = parse_path(path);
            let merged = match self.styles.get(&key) {
                Some(old) => style.join(old),
                None => style.clone(),
            };
            self.styles.insert(key, merged);
        }
    }

    /// Resolve a style path.
    pub fn get(&self, path: &str) -> Style {
        let path = parse_path(path);
        let mut ret = PartialStyle::default();
        for i in (0..=path.len()).rev() {
            if let Some(s) = self.styles.get(&path[..i]) {
                ret = ret.join(s);
                if ret.is_complete() {
                    break;
                }
            }
        }
        ret.resolve()
    }
}

/// The colour pairs a terminal has allocated. Terminals have a fixed number of
/// pair slots; drawing with one colour combination too many fails.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Maximum number of pairs.
    limit: usize,
    /// Allocated pairs.
    pairs: HashSet<(Color, Color)>,
}

impl Palette {
    /// A palette with `limit` slots.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            pairs: HashSet::new(),
        }
    }

    /// Make sure the style's colour pair has a slot.
    pub fn allocate(&mut self, style: &Style) -> Result<()> {
        let pair = (style.fg, style.bg);
        if self.pairs.contains(&pair) {
            return Ok(());
        }
        if self.pairs.len() >= self.limit {
            return Err(Error::Render(format!(
                "colour pair limit of {} exceeded",
                self.limit
            )));
        }
        self.pairs.insert(pair);
        Ok(())
    }

    /// Number of allocated pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Is nothing allocated?
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
