// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Live settings store synchronization.
//!
//! Reads and writes go key by key. A key that fails to read leaves its field
//! untouched, and a key that fails to write is skipped. Neither aborts the
//! rest of the pass.

use crate::{
    settings::{SettingsRecord, UnknownKeyword},
    store::{KeyValueStore, INTERFACE_SCHEMA, SOUND_SCHEMA},
};

use tracing::{debug, info, instrument, warn};

/// Keys of the interface schema, in application order.
pub const INTERFACE_KEYS: [&str; 12] = [
    "gtk-theme",
    "icon-theme",
    "cursor-theme",
    "cursor-size",
    "font-name",
    "font-hinting",
    "font-antialiasing",
    "font-rgba-order",
    "text-scaling-factor",
    "toolbar-style",
    "toolbar-icons-size",
    "color-scheme",
];

/// Keys of the sound schema, in application order.
pub const SOUND_KEYS: [&str; 2] = ["event-sounds", "input-feedback-sounds"];

/// Every live key paired with its schema.
pub fn live_keys() -> impl Iterator<Item = (&'static str, &'static str)> {
    INTERFACE_KEYS
        .into_iter()
        .map(|key| (INTERFACE_SCHEMA, key))
        .chain(SOUND_KEYS.into_iter().map(|key| (SOUND_SCHEMA, key)))
}

impl SettingsRecord {
    /// Value of live key as the store expects it.
    ///
    /// Returns `None` for keys that should not be written, i.e., unknown keys
    /// and a zero cursor size.
    pub fn live_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "gtk-theme" => self.widget_theme.clone(),
            "icon-theme" => self.icon_theme.clone(),
            "cursor-theme" => self.cursor_theme.clone(),
            "cursor-size" if self.cursor_size == 0 => return None,
            "cursor-size" => self.cursor_size.to_string(),
            "font-name" => self.font_name.clone(),
            "font-hinting" => self.font_hinting.to_string(),
            "font-antialiasing" => self.font_antialiasing.to_string(),
            "font-rgba-order" => self.font_rgba_order.to_string(),
            "text-scaling-factor" => format!("{:.6}", self.text_scaling_factor),
            "toolbar-style" => self.toolbar_style.to_string(),
            "toolbar-icons-size" => self.toolbar_icon_size.to_string(),
            "color-scheme" => self.color_scheme.to_string(),
            "event-sounds" => self.event_sounds.to_string(),
            "input-feedback-sounds" => self.input_feedback_sounds.to_string(),
            _ => return None,
        };

        Some(value)
    }

    /// Set field behind live key from store value.
    ///
    /// # Errors
    ///
    /// - Return [`LiveError::UnknownKey`] if key is not a live key.
    /// - Return [`LiveError::InvalidValue`] if value cannot be parsed.
    pub fn set_live_value(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || LiveError::InvalidValue {
            key: key.into(),
            value: value.into(),
        };

        match key {
            "gtk-theme" => self.widget_theme = value.into(),
            "icon-theme" => self.icon_theme = value.into(),
            "cursor-theme" => self.cursor_theme = value.into(),
            "cursor-size" => self.cursor_size = value.parse().map_err(|_| invalid())?,
            "font-name" => self.font_name = value.into(),
            "font-hinting" => self.font_hinting = value.parse()?,
            "font-antialiasing" => self.font_antialiasing = value.parse()?,
            "font-rgba-order" => self.font_rgba_order = value.parse()?,
            "text-scaling-factor" => {
                self.text_scaling_factor = value.parse().map_err(|_| invalid())?
            }
            "toolbar-style" => self.toolbar_style = value.parse()?,
            "toolbar-icons-size" => self.toolbar_icon_size = value.parse()?,
            "color-scheme" => self.color_scheme = value.parse()?,
            "event-sounds" => self.event_sounds = value.parse().map_err(|_| invalid())?,
            "input-feedback-sounds" => {
                self.input_feedback_sounds = value.parse().map_err(|_| invalid())?
            }
            _ => return Err(LiveError::UnknownKey(key.into())),
        }

        Ok(())
    }
}

/// Overlay record with every live key that can be read.
///
/// Returns the keys that could not be read or understood.
#[instrument(skip(record, store), level = "debug")]
pub fn load(record: &mut SettingsRecord, store: &impl KeyValueStore) -> Vec<&'static str> {
    info!("read live settings");
    let mut failed = Vec::new();

    for (schema, key) in live_keys() {
        let result = store
            .get(schema, key)
            .map_err(LiveError::from)
            .and_then(|value| record.set_live_value(key, &value).map(|_| value));

        match result {
            Ok(value) => debug!("{key}: {value}"),
            Err(error) => {
                warn!(
                    "cannot read {key}, leaving {:?}: {error}",
                    record.live_value(key).unwrap_or_default()
                );
                failed.push(key);
            }
        }
    }

    failed
}

/// Write every live key of record to store.
///
/// Returns the keys that failed to apply.
#[instrument(skip(record, store), level = "debug")]
pub fn apply(record: &SettingsRecord, store: &impl KeyValueStore) -> Vec<&'static str> {
    info!("apply live settings");
    let mut failed = Vec::new();

    for (schema, key) in live_keys() {
        let Some(value) = record.live_value(key) else {
            debug!("{key}: left untouched");
            continue;
        };

        match store.set(schema, key, &value) {
            Ok(()) => info!("{key}: {value} OK"),
            Err(error) => {
                warn!("{key}: {value}: {error}");
                failed.push(key);
            }
        }
    }

    failed
}

/// Live synchronization error types.
#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    /// Store query or update fails.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    /// Value is not valid for key.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    /// Keyword value is not valid for key.
    #[error(transparent)]
    Keyword(#[from] UnknownKeyword),

    /// Key is not a live key.
    #[error("unknown live key {0:?}")]
    UnknownKey(String),
}

/// Friendly result alias :3
pub type Result<T, E = LiveError> = std::result::Result<T, E>;
