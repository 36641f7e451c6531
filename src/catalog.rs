// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Theme discovery.
//!
//! Installed themes are found by walking the `themes` and `icons` folders of
//! every XDG data directory, plus the legacy `~/.themes` and `~/.icons`
//! folders.
//!
//! # Widget Themes
//!
//! A folder is a widget theme if one of its direct child directories starts
//! with the GTK engine marker `gtk-`, e.g., `gtk-3.0`. Widget themes are
//! identified by folder name, and the first occurrence in search order wins.
//!
//! # Icon and Cursor Themes
//!
//! Icon and cursor themes carry an `index.theme` descriptor whose `Name`
//! field is the display name. The display name can differ from the folder
//! name, and live-store keys use the folder name, so both are tracked in a
//! [`ThemeCatalog`]. An icon theme must declare `Directories` in its
//! descriptor. A cursor theme must contain a `cursors` directory. On
//! duplicate display names the last scanned folder wins.
//!
//! Entries of each search folder are visited in byte order of their names so
//! that scans are stable across runs.

use crate::path::XdgDirs;

use std::{
    collections::HashMap,
    fs::{read_dir, read_to_string},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Child directory prefix marking a widget theme.
pub const GTK_ENGINE_MARKER: &str = "gtk-";

/// Folder names never listed as widget themes.
pub const WIDGET_EXCLUSIONS: [&str; 2] = ["Default", "Emacs"];

/// Folder names never listed as icon or cursor themes.
pub const ICON_EXCLUSIONS: [&str; 3] = ["default", "hicolor", "locolor"];

/// Display name to folder name index of icon or cursor themes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    entries: HashMap<String, String>,
}

impl ThemeCatalog {
    /// Construct empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert theme, replacing any previous folder for the display name.
    pub fn insert(&mut self, display_name: impl Into<String>, folder_name: impl Into<String>) {
        self.entries.insert(display_name.into(), folder_name.into());
    }

    /// Folder name of theme shown as `display_name`.
    pub fn folder_name(&self, display_name: &str) -> Option<&str> {
        self.entries.get(display_name).map(String::as_str)
    }

    /// Display name of theme stored in `folder_name`.
    pub fn display_name(&self, folder_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, folder)| folder.as_str() == folder_name)
            .map(|(display, _)| display.as_str())
    }

    /// Display names sorted case-insensitively for presentation.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by_key(|name| name.to_uppercase());
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cursor themes plus the `cursors` directory of each theme folder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CursorCatalog {
    /// Display name to folder name index.
    pub themes: ThemeCatalog,

    /// Folder name to `cursors` directory, including folders without a
    /// usable descriptor.
    pub cursor_dirs: HashMap<String, PathBuf>,
}

/// Relevant fields of an `index.theme` descriptor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    /// Declared display name.
    pub name: Option<String>,

    /// Whether a `Directories` field is present.
    pub has_directories: bool,
}

impl ThemeDescriptor {
    /// Read `index.theme` inside theme folder.
    ///
    /// # Errors
    ///
    /// - Return [`CatalogError::ReadDescriptor`] if descriptor cannot be read.
    pub fn read(theme_dir: impl AsRef<Path>) -> Result<Self> {
        let path = theme_dir.as_ref().join("index.theme");
        read_to_string(&path)
            .map(|content| Self::from(content.as_str()))
            .map_err(|err| CatalogError::ReadDescriptor { source: err, path })
    }
}

impl From<&str> for ThemeDescriptor {
    fn from(content: &str) -> Self {
        fn field<'a>(line: &'a str, name: &str) -> Option<&'a str> {
            line.strip_prefix(name)
                .map(str::trim_start)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::trim)
        }

        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        let name = lines
            .iter()
            .find_map(|line| field(line, "Name"))
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        let has_directories = lines
            .iter()
            .any(|line| field(line, "Directories").is_some());

        Self {
            name,
            has_directories,
        }
    }
}

/// Folders holding widget themes, in search order.
pub fn widget_theme_roots(dirs: &XdgDirs) -> Vec<PathBuf> {
    roots(dirs, "themes", ".themes")
}

/// Folders holding icon and cursor themes, in search order.
pub fn icon_theme_roots(dirs: &XdgDirs) -> Vec<PathBuf> {
    roots(dirs, "icons", ".icons")
}

fn roots(dirs: &XdgDirs, data_subdir: &str, home_subdir: &str) -> Vec<PathBuf> {
    dirs.search_dirs()
        .into_iter()
        .map(|dir| dir.join(data_subdir))
        .chain(std::iter::once(dirs.home.join(home_subdir)))
        .filter(|path| path.is_dir())
        .collect()
}

/// Scan roots for widget themes.
///
/// Returns unique theme names sorted case-sensitively.
#[instrument(skip(roots), level = "debug")]
pub fn scan_widget_themes(roots: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for (name, path) in roots.iter().flat_map(|root| subdirs(root)) {
        if names.contains(&name) || !has_engine_marker(&path) {
            continue;
        }

        if WIDGET_EXCLUSIONS.contains(&name.as_str()) {
            debug!("excluded theme: {name}");
            continue;
        }

        debug!("theme found: {name}");
        names.push(name);
    }

    names.sort();
    names
}

/// Scan roots for icon themes.
#[instrument(skip(roots), level = "debug")]
pub fn scan_icon_themes(roots: &[PathBuf]) -> ThemeCatalog {
    let mut catalog = ThemeCatalog::new();

    for (folder, path) in roots.iter().flat_map(|root| subdirs(root)) {
        if ICON_EXCLUSIONS.contains(&folder.as_str()) {
            debug!("excluded icon theme: {folder}");
            continue;
        }

        match ThemeDescriptor::read(&path) {
            Ok(ThemeDescriptor {
                name: Some(name),
                has_directories: true,
            }) => {
                debug!("icon theme found: {name}");
                catalog.insert(name, folder);
            }
            Ok(_) => debug!("skip icon folder without name or directories: {folder}"),
            Err(error) => debug!("skip icon folder {folder}: {error}"),
        }
    }

    catalog
}

/// Scan roots for cursor themes.
#[instrument(skip(roots), level = "debug")]
pub fn scan_cursor_themes(roots: &[PathBuf]) -> CursorCatalog {
    let mut catalog = CursorCatalog::default();

    for (folder, path) in roots.iter().flat_map(|root| subdirs(root)) {
        if ICON_EXCLUSIONS.contains(&folder.as_str()) {
            continue;
        }

        let cursors = path.join("cursors");
        if !cursors.is_dir() {
            continue;
        }

        debug!("cursor theme found: {folder}");
        match ThemeDescriptor::read(&path) {
            Ok(ThemeDescriptor {
                name: Some(name), ..
            }) => catalog.themes.insert(name, folder.clone()),
            Ok(_) => debug!("cursor theme {folder} declares no name"),
            Err(error) => debug!("cursor theme {folder} has no descriptor: {error}"),
        }
        catalog.cursor_dirs.insert(folder, cursors);
    }

    catalog
}

/// Child directories of `root` as (name, path), sorted by name.
///
/// Unreadable roots and entries with non UTF-8 names are skipped.
fn subdirs(root: &Path) -> Vec<(String, PathBuf)> {
    let entries = match read_dir(root) {
        Ok(entries) => entries,
        Err(error) => {
            debug!("cannot list {:?}: {error}", root.display());
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_owned();
            Some((name, path))
        })
        .collect();
    dirs.sort();
    dirs
}

fn has_engine_marker(theme_dir: &Path) -> bool {
    subdirs(theme_dir)
        .iter()
        .any(|(name, _)| name.starts_with(GTK_ENGINE_MARKER))
}

/// Theme discovery error types.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Theme descriptor cannot be read.
    #[error("failed to read theme descriptor at {:?}", path.display())]
    ReadDescriptor {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;
    use std::fs::{create_dir_all, write};

    fn icon_theme(root: &Path, folder: &str, descriptor: &str) -> anyhow::Result<()> {
        create_dir_all(root.join(folder))?;
        write(root.join(folder).join("index.theme"), descriptor)?;
        Ok(())
    }

    #[test]
    fn parse_descriptor() {
        let result = ThemeDescriptor::from(indoc! {r#"
            [Icon Theme]
            Name = Papirus Dark
            Comment=Papirus icon theme
            Directories=16x16/actions,16x16/apps
        "#});
        let expect = ThemeDescriptor {
            name: Some("Papirus Dark".into()),
            has_directories: true,
        };
        assert_eq!(result, expect);

        let result = ThemeDescriptor::from("[Icon Theme]\nNameless=foo\n");
        assert_eq!(result, ThemeDescriptor::default());
    }

    #[sealed_test]
    fn widget_themes_need_engine_marker() -> anyhow::Result<()> {
        let root = std::env::current_dir()?.join("themes");
        create_dir_all(root.join("Arc/gtk-3.0"))?;
        create_dir_all(root.join("Adwaita/gtk-2.0"))?;
        create_dir_all(root.join("Plain/metacity-1"))?;
        create_dir_all(root.join("Nested/share/gtk-3.0"))?;
        create_dir_all(root.join("Default/gtk-3.0"))?;
        create_dir_all(root.join("Emacs/gtk-2.0-key"))?;

        assert_eq!(scan_widget_themes(&[root]), vec!["Adwaita", "Arc"]);

        Ok(())
    }

    #[sealed_test]
    fn widget_themes_are_unique_and_case_sensitively_sorted() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let user = cwd.join("user");
        let system = cwd.join("system");
        create_dir_all(user.join("arc/gtk-3.0"))?;
        create_dir_all(user.join("Zed/gtk-3.0"))?;
        create_dir_all(system.join("Zed/gtk-3.0"))?;
        create_dir_all(system.join("Breeze/gtk-4.0"))?;

        assert_eq!(
            scan_widget_themes(&[user, system]),
            vec!["Breeze", "Zed", "arc"]
        );

        Ok(())
    }

    #[sealed_test]
    fn icon_themes_map_display_to_folder() -> anyhow::Result<()> {
        let root = std::env::current_dir()?.join("icons");
        let valid = "[Icon Theme]\nName=Papirus Dark\nDirectories=16x16\n";
        icon_theme(&root, "Papirus-Dark", valid)?;
        icon_theme(&root, "hicolor", "[Icon Theme]\nName=Hicolor\nDirectories=16x16\n")?;
        icon_theme(&root, "NoDirs", "[Icon Theme]\nName=No Dirs\n")?;
        icon_theme(&root, "NoName", "[Icon Theme]\nDirectories=16x16\n")?;
        create_dir_all(root.join("NoDescriptor"))?;

        let catalog = scan_icon_themes(&[root]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.folder_name("Papirus Dark"), Some("Papirus-Dark"));
        assert_eq!(catalog.display_name("Papirus-Dark"), Some("Papirus Dark"));
        assert_eq!(catalog.folder_name("Hicolor"), None);

        Ok(())
    }

    #[sealed_test]
    fn icon_themes_last_scanned_wins() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let descriptor = "[Icon Theme]\nName=Shared\nDirectories=16x16\n";
        icon_theme(&cwd.join("first"), "shared-a", descriptor)?;
        icon_theme(&cwd.join("second"), "shared-b", descriptor)?;

        let catalog = scan_icon_themes(&[cwd.join("first"), cwd.join("second")]);
        assert_eq!(catalog.folder_name("Shared"), Some("shared-b"));

        Ok(())
    }

    #[test]
    fn sorted_names_ignore_case() {
        let mut catalog = ThemeCatalog::new();
        catalog.insert("breeze", "breeze");
        catalog.insert("Adwaita", "Adwaita");
        catalog.insert("Papirus", "Papirus");
        assert_eq!(catalog.sorted_names(), vec!["Adwaita", "breeze", "Papirus"]);
    }

    #[sealed_test]
    fn cursor_themes_need_cursors_directory() -> anyhow::Result<()> {
        let root = std::env::current_dir()?.join("icons");
        icon_theme(&root, "Bibata-Modern", "[Icon Theme]\nName=Bibata Modern\n")?;
        create_dir_all(root.join("Bibata-Modern/cursors"))?;
        create_dir_all(root.join("Bare/cursors"))?;
        icon_theme(&root, "IconsOnly", "[Icon Theme]\nName=Icons\nDirectories=16x16\n")?;
        create_dir_all(root.join("default/cursors"))?;
        icon_theme(&root, "hicolor", "[Icon Theme]\nName=Hicolor\n")?;
        create_dir_all(root.join("hicolor/cursors"))?;

        let catalog = scan_cursor_themes(&[root.clone()]);
        assert_eq!(catalog.themes.len(), 1);
        assert_eq!(
            catalog.themes.folder_name("Bibata Modern"),
            Some("Bibata-Modern")
        );
        assert_eq!(
            catalog.cursor_dirs.get("Bare"),
            Some(&root.join("Bare/cursors"))
        );
        assert!(!catalog.cursor_dirs.contains_key("IconsOnly"));
        assert!(!catalog.cursor_dirs.contains_key("default"));
        assert_eq!(catalog.themes.folder_name("Hicolor"), None);
        assert!(!catalog.cursor_dirs.contains_key("hicolor"));

        Ok(())
    }

    #[sealed_test]
    fn roots_include_legacy_home_folders() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        create_dir_all(cwd.join("home/.local/share/themes"))?;
        create_dir_all(cwd.join("home/.themes"))?;
        create_dir_all(cwd.join("usr/share/icons"))?;
        create_dir_all(cwd.join("home/.icons"))?;

        let dirs = XdgDirs {
            home: cwd.join("home"),
            config_home: cwd.join("home/.config"),
            data_home: cwd.join("home/.local/share"),
            data_dirs: vec![cwd.join("usr/share")],
            gtk2_rc_file: None,
        };

        assert_eq!(
            widget_theme_roots(&dirs),
            vec![cwd.join("home/.local/share/themes"), cwd.join("home/.themes")]
        );
        assert_eq!(
            icon_theme_roots(&dirs),
            vec![cwd.join("usr/share/icons"), cwd.join("home/.icons")]
        );

        Ok(())
    }
}
