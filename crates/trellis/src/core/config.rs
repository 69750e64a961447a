//! Toolkit configuration.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::text::DEFAULT_TAB_STOP,
    editor::DEFAULT_GAP_SIZE,
    error::{Error, Result},
    keymap::BindingSpec,
    logging::LogConfig,
    style::PartialStyle,
};

/// Maximum number of distinct colour pairs a frame may use by default.
pub const DEFAULT_COLOR_PAIRS: usize = 256;

/// Configuration consumed by [`Toolkit::new`](crate::Toolkit::new). Every
/// field has a default, so an empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab stop distance for wrapping and drawing text.
    pub tab_stop: u32,
    /// Spare capacity kept in text edit gap buffers.
    pub gap_size: usize,
    /// Glyph drawn in the corner of a top-most window with nothing focused.
    pub marker_char: char,
    /// Number of distinct colour pairs the terminal can show.
    pub color_pairs: usize,
    /// Extra bindings, applied over the defaults.
    pub bindings: Vec<BindingSpec>,
    /// Style overrides keyed by style path, layered over the defaults.
    pub styles: BTreeMap<String, PartialStyle>,
    /// Optional file logging.
    pub log: Option<LogConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            gap_size: DEFAULT_GAP_SIZE,
            marker_char: '+',
            color_pairs: DEFAULT_COLOR_PAIRS,
            bindings: Vec::new(),
            styles: BTreeMap::new(),
            log: None,
        }
    }
}

impl Config {
    /// Parse a JSON configuration.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        if cfg.tab_stop == 0 {
            return Err(Error::Config("tab_stop must be at least 1".into()));
        }
        Ok(cfg)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&s)
    }
}
