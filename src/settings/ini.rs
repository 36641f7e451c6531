// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! GTK3 `settings.ini` parsing.
//!
//! The file is a single `[Settings]` section of `key=value` lines. Only a
//! fixed set of keys is understood. Every other non-empty, non-section line
//! is kept verbatim in [`GtkIni::unrecognized_lines`] so that a later write
//! can put it back.

use std::{fs::read_to_string, path::Path};
use tracing::{debug, instrument, warn};

/// Keys understood in `settings.ini`, in the order they are written.
pub const RECOGNIZED_KEYS: [&str; 16] = [
    "gtk-theme-name",
    "gtk-icon-theme-name",
    "gtk-font-name",
    "gtk-cursor-theme-name",
    "gtk-cursor-theme-size",
    "gtk-toolbar-style",
    "gtk-toolbar-icon-size",
    "gtk-button-images",
    "gtk-menu-images",
    "gtk-enable-event-sounds",
    "gtk-enable-input-feedback-sounds",
    "gtk-xft-antialias",
    "gtk-xft-hinting",
    "gtk-xft-hintstyle",
    "gtk-xft-rgba",
    "gtk-application-prefer-dark-theme",
];

/// Check if line assigns one of [`RECOGNIZED_KEYS`].
///
/// The key is the text before the first `=`, trimmed. It must match a
/// recognized key exactly, so `gtk-theme-name-fallback=foo` is foreign.
pub fn is_recognized(line: &str) -> bool {
    line.split_once('=')
        .is_some_and(|(key, _)| RECOGNIZED_KEYS.contains(&key.trim()))
}

/// Parsed contents of `settings.ini`.
///
/// Integer fields hold -1 when absent or malformed, except
/// `cursor_theme_size` which holds 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtkIni {
    pub theme_name: Option<String>,
    pub icon_theme_name: Option<String>,
    pub font_name: Option<String>,
    pub cursor_theme_name: Option<String>,
    pub cursor_theme_size: i32,
    pub toolbar_style: Option<String>,
    pub toolbar_icon_size: Option<String>,
    pub button_images: Option<bool>,
    pub menu_images: Option<bool>,
    pub enable_event_sounds: Option<bool>,
    pub enable_input_feedback_sounds: Option<bool>,
    pub xft_antialias: i32,
    pub xft_hinting: i32,
    pub xft_hintstyle: Option<String>,
    pub xft_rgba: Option<String>,
    pub application_prefer_dark_theme: Option<bool>,

    /// Lines not modeled above, in file order.
    pub unrecognized_lines: Vec<String>,
}

impl Default for GtkIni {
    fn default() -> Self {
        Self {
            theme_name: None,
            icon_theme_name: None,
            font_name: None,
            cursor_theme_name: None,
            cursor_theme_size: 0,
            toolbar_style: None,
            toolbar_icon_size: None,
            button_images: None,
            menu_images: None,
            enable_event_sounds: None,
            enable_input_feedback_sounds: None,
            xft_antialias: -1,
            xft_hinting: -1,
            xft_hintstyle: None,
            xft_rgba: None,
            application_prefer_dark_theme: None,
            unrecognized_lines: Vec::new(),
        }
    }
}

impl GtkIni {
    /// Read and parse `settings.ini` at `path`.
    ///
    /// # Errors
    ///
    /// - Return [`IniError::Read`] if file cannot be read.
    #[instrument(skip(path), level = "debug")]
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|err| IniError::Read {
            source: err,
            path: path.as_ref().display().to_string(),
        })?;
        debug!("parse {:?}", path.as_ref().display());

        Ok(Self::from(content.as_str()))
    }

    fn assign(&mut self, key: &str, value: &str) -> bool {
        let text = || Some(value.to_owned());
        let flag = || Some(value == "1");

        match key {
            "gtk-theme-name" => self.theme_name = text(),
            "gtk-icon-theme-name" => self.icon_theme_name = text(),
            "gtk-font-name" => self.font_name = text(),
            "gtk-cursor-theme-name" => self.cursor_theme_name = text(),
            "gtk-cursor-theme-size" => {
                self.cursor_theme_size = match int_value(value) {
                    -1 => 0,
                    size => size,
                }
            }
            "gtk-toolbar-style" => self.toolbar_style = text(),
            "gtk-toolbar-icon-size" => self.toolbar_icon_size = text(),
            "gtk-button-images" => self.button_images = flag(),
            "gtk-menu-images" => self.menu_images = flag(),
            "gtk-enable-event-sounds" => self.enable_event_sounds = flag(),
            "gtk-enable-input-feedback-sounds" => self.enable_input_feedback_sounds = flag(),
            "gtk-xft-antialias" => self.xft_antialias = int_value(value),
            "gtk-xft-hinting" => self.xft_hinting = int_value(value),
            "gtk-xft-hintstyle" => self.xft_hintstyle = text(),
            "gtk-xft-rgba" => self.xft_rgba = text(),
            "gtk-application-prefer-dark-theme" => self.application_prefer_dark_theme = flag(),
            _ => return false,
        }

        true
    }
}

impl From<&str> for GtkIni {
    fn from(content: &str) -> Self {
        let mut ini = Self::default();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('[') {
                continue;
            }

            if line.starts_with('#') {
                ini.unrecognized_lines.push(line.to_owned());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                ini.unrecognized_lines.push(line.to_owned());
                continue;
            };

            let key = key.trim();
            if !ini.assign(key, value.trim()) {
                warn!("unsupported config key: {key}");
            }

            // INVARIANT: Never keep a line that a write would emit again.
            if !is_recognized(line) {
                ini.unrecognized_lines.push(line.to_owned());
            }
        }

        ini
    }
}

/// Parse integer, using -1 as the "use default" sentinel on failure.
fn int_value(value: &str) -> i32 {
    value.parse().unwrap_or(-1)
}

/// `settings.ini` error types.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    /// File cannot be read.
    #[error("failed to read settings file at {path:?}")]
    Read {
        #[source]
        source: std::io::Error,
        path: String,
    },
}

/// Friendly result alias :3
pub type Result<T, E = IniError> = std::result::Result<T, E>;
