//! Sheet settings loaded from `config.toml`.
//!
//! ```toml
//! rows = 100
//! cols = 26
//! max_pending_edits = 50
//! log_level = "warn"
//! enforce_bounds = true
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use directories::ProjectDirs;
use log::{LevelFilter, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Number of rows in the grid
    pub rows: u32,
    /// Number of columns in the grid
    pub cols: u32,
    /// Pending assistant edits kept before the oldest is dropped
    pub max_pending_edits: usize,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Reject edits and references outside `rows` x `cols`
    pub enforce_bounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rows: 100,
            cols: 26,
            max_pending_edits: 50,
            log_level: "warn".to_string(),
            enforce_bounds: true,
        }
    }
}

impl Settings {
    /// `<config dir>/config.toml`, or None when no home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("dev", "sheetmind", "sheetmind")?;
        let mut path = proj.config_dir().to_path_buf();
        path.push("config.toml");
        Some(path)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Settings> {
        let settings: Settings = toml::from_str(text).map_err(|source| SheetError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings file.
    pub fn load(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml(&text, path)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load the default settings file if there is one, otherwise use defaults.
    pub fn load_default() -> Result<Settings> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Settings::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SheetError::InvalidSetting(
                "rows and cols must be at least 1".to_string(),
            ));
        }
        if self.max_pending_edits == 0 {
            return Err(SheetError::InvalidSetting(
                "max_pending_edits must be at least 1".to_string(),
            ));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(SheetError::InvalidSetting(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}
