//! Settings Persistence
//!
//! Ties a [`Config`] to the file it was read from so callers can edit it in
//! memory and write it back. A missing file is not an error: the store starts
//! from defaults and creates the file on the first save.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SettingsResult;

/// A configuration bound to its file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    config: Config,
    dirty: bool,
}

impl SettingsStore {
    /// Opens the store at `path`, loading the file if it exists.
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            Config::load_from_file(&path)?
        } else {
            debug!("No settings at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self {
            path,
            config,
            dirty: false,
        })
    }

    /// Opens the store at [`Config::default_path`].
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(Config::default_path()?)
    }

    /// Like [`SettingsStore::open`], but an unreadable or invalid file
    /// falls back to defaults instead of failing.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self {
                    path,
                    config: Config::default(),
                    dirty: false,
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access; marks the store as having unsaved changes.
    pub fn config_mut(&mut self) -> &mut Config {
        self.dirty = true;
        &mut self.config
    }

    /// Replaces the whole configuration after validating it.
    pub fn set_config(&mut self, config: Config) -> SettingsResult<()> {
        config.validate()?;
        self.config = config;
        self.dirty = true;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Restores every section to its default.
    pub fn reset(&mut self) {
        self.config = Config::default();
        self.dirty = true;
    }

    /// Rereads the file, discarding unsaved changes.
    pub fn reload(&mut self) -> SettingsResult<()> {
        self.config = if self.path.exists() {
            Config::load_from_file(&self.path)?
        } else {
            Config::default()
        };
        self.dirty = false;
        Ok(())
    }

    /// Writes the configuration to its file.
    pub fn save(&mut self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)?;
        self.dirty = false;
        Ok(())
    }
}
