// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Plain-text backup of the live settings store.
//!
//! After settings are applied, the live store is read back and saved as
//! `key=value` lines. The backup lets a session startup script re-apply the
//! same settings without opening the editor.

use crate::{
    settings::{live::live_keys, SettingsRecord},
    store::KeyValueStore,
};

use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};
use tracing::{info, instrument, warn};

/// First line of every backup file.
pub const BACKUP_HEADER: &str = "# Generated by nwg-look, do not edit this file.";

/// Render live store contents as backup lines.
///
/// Keys that cannot be read are left out.
pub fn render(store: &impl KeyValueStore) -> Vec<String> {
    let mut lines = vec![BACKUP_HEADER.to_owned()];
    for (schema, key) in live_keys() {
        match store.get(schema, key) {
            Ok(value) => lines.push(format!("{key}={value}")),
            Err(error) => warn!("cannot back up {key}: {error}"),
        }
    }

    lines
}

/// Read live store back and save it to `path`.
///
/// # Errors
///
/// - Return [`BackupError::Write`] if backup cannot be written.
#[instrument(skip(store, path), level = "debug")]
pub fn save(store: &impl KeyValueStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("back up live settings to {:?}", path.display());
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        mkdirp::mkdirp(parent).map_err(|err| BackupError::Write {
            source: err,
            path: parent.to_path_buf(),
        })?;
    }

    let mut content = render(store).join("\n");
    content.push('\n');
    write(path, content).map_err(|err| BackupError::Write {
        source: err,
        path: path.to_path_buf(),
    })
}

/// Overlay record with values stored in backup at `path`.
///
/// Comment lines and lines without `=` are skipped. Values that do not parse
/// are logged and leave their field untouched.
///
/// # Errors
///
/// - Return [`BackupError::Read`] if backup cannot be read.
#[instrument(skip(record, path), level = "debug")]
pub fn load(record: &mut SettingsRecord, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("load live settings from {:?}", path.display());
    let content = read_to_string(path).map_err(|err| BackupError::Read {
        source: err,
        path: path.to_path_buf(),
    })?;

    merge(record, &content);
    Ok(())
}

fn merge(record: &mut SettingsRecord, content: &str) {
    for line in content.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        if let Err(error) = record.set_live_value(key, value) {
            warn!("skip backup line {line:?}: {error}");
        }
    }
}

/// Backup error types.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// Backup cannot be read.
    #[error("failed to read backup at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Backup cannot be written.
    #[error("failed to write backup at {:?}", path.display())]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

impl BackupError {
    /// Whether the backup file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Write { .. } => false,
        }
    }
}

/// Friendly result alias :3
pub type Result<T, E = BackupError> = std::result::Result<T, E>;
