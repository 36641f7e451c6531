// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Application state.
//!
//! [`AppState`] owns everything the editor works on: resolved directories,
//! the unified settings record, the three theme catalogs, and the export
//! preferences. Frontends mutate it through its methods and hand it a
//! [`KeyValueStore`] whenever the live session must be read or updated.
//!
//! Loading merges sources in a fixed order. Defaults come first, then GTK3
//! `settings.ini` when present, then every live key that can be read.
//! Applying fans the record out to the live store, saves a backup of the
//! live store, and writes each file sink enabled in the preferences. No
//! single failure stops the fan out.

use crate::{
    catalog::{
        icon_theme_roots, scan_cursor_themes, scan_icon_themes, scan_widget_themes,
        widget_theme_roots, CursorCatalog, ThemeCatalog,
    },
    config::{ConfigError, Preferences, PreferencesFile},
    export::{export, Export, Gtkrc20, IndexTheme, SettingsIni, Xsettingsd},
    path::XdgDirs,
    settings::{
        backup::{self, BackupError},
        ini::GtkIni,
        live, SettingsRecord,
    },
    store::KeyValueStore,
};

use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Outcome of a full apply.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Live keys the store rejected.
    pub live_failures: Vec<&'static str>,

    /// Whether the live store backup was saved.
    pub backup_saved: bool,

    /// Files written, in sink order.
    pub written: Vec<PathBuf>,

    /// Sinks that were enabled but could not be written.
    pub failed_exports: Vec<&'static str>,
}

impl ApplyReport {
    /// Whether every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.live_failures.is_empty() && self.backup_saved && self.failed_exports.is_empty()
    }
}

/// Owned editor state.
#[derive(Debug, Clone)]
pub struct AppState {
    dirs: XdgDirs,
    settings: SettingsRecord,
    widget_themes: Vec<String>,
    icon_themes: ThemeCatalog,
    cursor_themes: CursorCatalog,
    preferences_file: PreferencesFile,
    preferences: Preferences,
}

impl AppState {
    /// Construct state holding defaults only.
    ///
    /// Nothing is read from disk or the live store.
    pub fn new(dirs: XdgDirs) -> Self {
        let preferences_file = PreferencesFile::new(dirs.preferences());
        Self {
            dirs,
            settings: SettingsRecord::default(),
            widget_themes: Vec::new(),
            icon_themes: ThemeCatalog::new(),
            cursor_themes: CursorCatalog::default(),
            preferences_file,
            preferences: Preferences::default(),
        }
    }

    /// Construct state from every source.
    ///
    /// Preferences that cannot be read or created are logged and left at
    /// their defaults.
    #[instrument(skip(dirs, store), level = "debug")]
    pub fn load(dirs: XdgDirs, store: &impl KeyValueStore) -> Self {
        let mut state = Self::new(dirs);
        match state.preferences_file.load() {
            Ok(preferences) => state.preferences = preferences,
            Err(error) => warn!("{error}, using default preferences"),
        }
        state.rescan_themes();
        state.read_settings_ini();
        state.read_live(store);

        state
    }

    /// Rescan every theme catalog.
    pub fn rescan_themes(&mut self) {
        let widget_roots = widget_theme_roots(&self.dirs);
        let icon_roots = icon_theme_roots(&self.dirs);
        self.widget_themes = scan_widget_themes(&widget_roots);
        self.icon_themes = scan_icon_themes(&icon_roots);
        self.cursor_themes = scan_cursor_themes(&icon_roots);
        info!(
            "found {} widget, {} icon and {} cursor themes",
            self.widget_themes.len(),
            self.icon_themes.len(),
            self.cursor_themes.themes.len()
        );
    }

    /// Overlay settings from GTK3 `settings.ini`.
    ///
    /// A missing file leaves the record as is. An unreadable one is logged.
    pub fn read_settings_ini(&mut self) {
        let path = self.dirs.gtk3_settings_ini();
        if !path.exists() {
            debug!("{:?} not found", path.display());
            return;
        }

        match GtkIni::read(&path) {
            Ok(ini) => self.settings.merge_ini(&ini),
            Err(error) => warn!("{error}"),
        }
    }

    /// Overlay settings from the live store.
    ///
    /// Returns keys that could not be read.
    pub fn read_live(&mut self, store: &impl KeyValueStore) -> Vec<&'static str> {
        live::load(&mut self.settings, store)
    }

    pub fn dirs(&self) -> &XdgDirs {
        &self.dirs
    }

    pub fn settings(&self) -> &SettingsRecord {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsRecord {
        &mut self.settings
    }

    /// Widget theme names, sorted.
    pub fn widget_themes(&self) -> &[String] {
        &self.widget_themes
    }

    pub fn icon_themes(&self) -> &ThemeCatalog {
        &self.icon_themes
    }

    pub fn cursor_themes(&self) -> &CursorCatalog {
        &self.cursor_themes
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace preferences in memory. Use [`AppState::save_preferences`] to
    /// persist them.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    /// Persist current preferences.
    ///
    /// # Errors
    ///
    /// - Return [`AppError::Config`] if preferences cannot be written.
    pub fn save_preferences(&self) -> Result<()> {
        self.preferences_file.save(&self.preferences)?;
        Ok(())
    }

    /// Select widget theme by name.
    ///
    /// # Errors
    ///
    /// - Return [`AppError::UnknownTheme`] if theme was not discovered.
    pub fn select_widget_theme(&mut self, name: &str) -> Result<()> {
        if !self.widget_themes.iter().any(|theme| theme == name) {
            return Err(AppError::UnknownTheme(name.to_owned()));
        }

        self.settings.widget_theme = name.to_owned();
        Ok(())
    }

    /// Select icon theme by display name, storing its folder name.
    ///
    /// # Errors
    ///
    /// - Return [`AppError::UnknownTheme`] if theme was not discovered.
    pub fn select_icon_theme(&mut self, display_name: &str) -> Result<()> {
        let folder = self
            .icon_themes
            .folder_name(display_name)
            .ok_or_else(|| AppError::UnknownTheme(display_name.to_owned()))?;
        self.settings.icon_theme = folder.to_owned();
        Ok(())
    }

    /// Select cursor theme by display name, storing its folder name.
    ///
    /// # Errors
    ///
    /// - Return [`AppError::UnknownTheme`] if theme was not discovered.
    pub fn select_cursor_theme(&mut self, display_name: &str) -> Result<()> {
        let folder = self
            .cursor_themes
            .themes
            .folder_name(display_name)
            .ok_or_else(|| AppError::UnknownTheme(display_name.to_owned()))?;
        self.settings.cursor_theme = folder.to_owned();
        Ok(())
    }

    /// File sinks enabled by current preferences, in write order.
    pub fn enabled_sinks(&self) -> Vec<&'static dyn Export> {
        let mut sinks: Vec<&'static dyn Export> = Vec::new();
        if self.preferences.export_settings_ini {
            sinks.push(&SettingsIni);
        }
        if self.preferences.export_gtkrc_20 {
            sinks.push(&Gtkrc20);
        }
        if self.preferences.export_index_theme {
            sinks.push(&IndexTheme);
        }
        if self.preferences.export_xsettingsd {
            sinks.push(&Xsettingsd);
        }

        sinks
    }

    /// Write settings to every enabled file sink.
    ///
    /// Returns the written paths and the names of sinks that failed.
    #[instrument(skip(self), level = "debug")]
    pub fn export_files(&self) -> (Vec<PathBuf>, Vec<&'static str>) {
        let mut written = Vec::new();
        let mut failed = Vec::new();

        for sink in self.enabled_sinks() {
            match export(sink, &self.settings, &self.dirs) {
                Ok(path) => written.push(path),
                Err(error) => {
                    warn!("{error}");
                    failed.push(sink.name());
                }
            }
        }

        (written, failed)
    }

    /// Fan settings out to the live store, the backup, and enabled sinks.
    #[instrument(skip(self, store), level = "debug")]
    pub fn apply(&self, store: &impl KeyValueStore) -> ApplyReport {
        let live_failures = live::apply(&self.settings, store);

        let backup_saved = match backup::save(store, self.dirs.live_backup()) {
            Ok(()) => true,
            Err(error) => {
                warn!("{error}");
                false
            }
        };

        let (written, failed_exports) = self.export_files();

        ApplyReport {
            live_failures,
            backup_saved,
            written,
            failed_exports,
        }
    }

    /// Load stored backup into settings and apply it to the live store.
    ///
    /// Returns keys the store rejected.
    ///
    /// # Errors
    ///
    /// - Return [`AppError::Backup`] if backup cannot be read.
    pub fn apply_backup(&mut self, store: &impl KeyValueStore) -> Result<Vec<&'static str>> {
        backup::load(&mut self.settings, self.dirs.live_backup())?;
        Ok(live::apply(&self.settings, store))
    }

    /// Reset settings to defaults and apply them.
    ///
    /// Preserved foreign `settings.ini` lines survive the reset.
    pub fn restore_defaults(&mut self, store: &impl KeyValueStore) -> ApplyReport {
        info!("restore default settings");
        let unrecognized_lines = std::mem::take(&mut self.settings.unrecognized_lines);
        self.settings = SettingsRecord {
            unrecognized_lines,
            ..SettingsRecord::default()
        };

        self.apply(store)
    }
}

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Preferences cannot be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Live store backup cannot be read.
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// Theme was not discovered by the last scan.
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

/// Friendly result alias :3
pub type Result<T, E = AppError> = std::result::Result<T, E>;
