// src/config/loader.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use tracing::debug;

use crate::config::model::Settings;
use crate::errors::Result;

/// Name of the optional settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "brolly.toml";

/// Name of the file holding the last successful backup time.
pub const LAST_BACKUP_FILE: &str = "last_backup";

/// Well-known layout of the configuration directory.
///
/// Everything brolly touches lives under one directory: the backup script,
/// the optional settings file, and the last-backup marker.
#[derive(Debug, Clone)]
pub struct Paths {
    pub dir: PathBuf,
}

impl Paths {
    /// Resolve the configuration directory.
    ///
    /// An explicit `--dir` wins; otherwise the platform config dir is used
    /// (e.g. `~/.config/brolly` on Linux).
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self { dir }),
            None => dirs::config_dir()
                .map(|base| Self {
                    dir: base.join("brolly"),
                })
                .ok_or_else(|| {
                    anyhow!("could not determine a configuration directory; pass --dir")
                }),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn script_file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn last_backup_file(&self) -> PathBuf {
        self.dir.join(LAST_BACKUP_FILE)
    }
}

/// First-run bootstrap: make sure the configuration directory exists.
///
/// The script itself is the user's to provide; until it appears, triggers
/// resolve to the setup state rather than an error.
pub fn bootstrap(paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.dir)
        .with_context(|| format!("creating configuration directory at {:?}", paths.dir))
}

/// Load `brolly.toml` from the configuration directory.
///
/// A missing file is not an error; it simply means defaults.
pub fn load_settings(paths: &Paths) -> Result<Settings> {
    let path = paths.settings_file();
    if !path.exists() {
        debug!(path = ?path, "no settings file, using defaults");
        return Ok(Settings::default());
    }

    let contents =
        fs::read_to_string(&path).with_context(|| format!("reading settings file at {path:?}"))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parsing TOML settings at {path:?}"))?;
    Ok(settings)
}
