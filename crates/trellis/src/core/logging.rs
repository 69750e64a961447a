//! File logging. The terminal belongs to the toolkit, so log output goes to a
//! file instead.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::LevelFilter, fmt};

use crate::error::{Error, Result};

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file, appended to.
    pub path: PathBuf,
    /// Maximum level: one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_level")]
    pub level: String,
}

/// Default log level.
fn default_level() -> String {
    "info".into()
}

/// Install a global `tracing` subscriber writing compact, uncoloured lines to
/// the configured file. Only one subscriber may be installed per process.
pub fn init_logging(cfg: &LogConfig) -> Result<()> {
    let level: LevelFilter = cfg
        .level
        .parse()
        .map_err(|_| Error::Config(format!("invalid log level: {:?}", cfg.level)))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.path)
        .map_err(|e| Error::Config(format!("{}: {e}", cfg.path.display())))?;

    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(level)
        .event_format(format)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn bad_level() {
        let cfg = LogConfig {
            path: env::temp_dir().join("trellis-bad-level.log"),
            level: "loud".into(),
        };
        assert!(matches!(init_logging(&cfg), Err(Error::Config(_))));
    }

    #[test]
    fn second_init_fails() {
        let cfg = LogConfig {
            path: env::temp_dir().join("trellis-logging-test.log"),
            level: "debug".into(),
        };
        let _ = init_logging(&cfg);
        assert!(matches!(init_logging(&cfg), Err(Error::Config(_))));
        tracing::debug!("logged to file");
    }
}
