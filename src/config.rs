// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Program preferences.
//!
//! nwg-look keeps a small JSON file of toggles that decide which file sinks
//! are written when settings are applied. The file lives at
//! `$XDG_CONFIG_HOME/nwg-look/config`:
//!
//! ```json
//! {
//!   "export-settings-ini": true,
//!   "export-gtkrc-20": true,
//!   "export-index-theme": true,
//!   "export-xsettingsd": true
//! }
//! ```
//!
//! Missing toggles default to `true`. A file that is not valid JSON at all
//! is ignored in favor of the defaults, and left on disk untouched until the
//! next explicit save.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::{read_to_string, write},
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info, instrument, warn};

/// Export toggles, one per file sink.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Preferences {
    /// Write GTK3 `settings.ini`.
    pub export_settings_ini: bool,

    /// Write `.gtkrc-2.0`.
    pub export_gtkrc_20: bool,

    /// Write default cursor `index.theme`.
    pub export_index_theme: bool,

    /// Write `xsettingsd.conf`.
    pub export_xsettingsd: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            export_settings_ini: true,
            export_gtkrc_20: true,
            export_index_theme: true,
            export_xsettingsd: true,
        }
    }
}

impl FromStr for Preferences {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(data).map_err(ConfigError::Deserialize)
    }
}

impl Display for Preferences {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            serde_json::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Preferences file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesFile {
    path: PathBuf,
}

impl PreferencesFile {
    /// Construct handle to preferences file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Load preferences.
    ///
    /// Creates the file with defaults if it does not exist yet. Falls back to
    /// defaults without touching the file if it is not valid JSON.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if existing file cannot be read.
    /// - Return [`ConfigError::Write`] if missing file cannot be created.
    #[instrument(skip(self), level = "debug")]
    pub fn load(&self) -> Result<Preferences> {
        let data = match read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("{:?} not found, creating", self.path.display());
                let preferences = Preferences::default();
                self.save(&preferences)?;
                return Ok(preferences);
            }
            Err(err) => {
                return Err(ConfigError::Read {
                    source: err,
                    path: self.path.clone(),
                })
            }
        };

        let preferences = match data.parse::<Preferences>() {
            Ok(preferences) => preferences,
            Err(error) => {
                warn!(
                    "malformed preferences at {:?}, using defaults: {error}",
                    self.path.display()
                );
                Preferences::default()
            }
        };
        debug!("loaded preferences: {preferences:?}");

        Ok(preferences)
    }

    /// Save preferences as indented JSON, overwriting the file.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Serialize`] if preferences cannot be encoded.
    /// - Return [`ConfigError::Write`] if file cannot be written.
    #[instrument(skip(self, preferences), level = "debug")]
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        let write_error = |err, path: &Path| ConfigError::Write {
            source: err,
            path: path.to_path_buf(),
        };

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            mkdirp::mkdirp(parent).map_err(|err| write_error(err, parent))?;
        }

        let data = serde_json::to_string_pretty(preferences).map_err(ConfigError::Serialize)?;
        write(&self.path, data).map_err(|err| write_error(err, &self.path))?;
        debug!("saved preferences: {preferences:?}");

        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize preferences.
    #[error(transparent)]
    Deserialize(serde_json::Error),

    /// Failed to serialize preferences.
    #[error(transparent)]
    Serialize(serde_json::Error),

    /// Preferences file cannot be read.
    #[error("failed to read preferences at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Preferences file cannot be written.
    #[error("failed to write preferences at {:?}", path.display())]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
