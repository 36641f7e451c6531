// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine where theme resources live, and where each configuration file
//! that nwg-look reads or writes is expected to be. Every lookup goes through
//! [`XdgDirs`], which is resolved once from the process environment and then
//! passed around explicitly.
//!
//! # Precedence
//!
//! Theme resources are searched in the user's data home first, followed by
//! each entry of `$XDG_DATA_DIRS` in listed order. Directories that do not
//! exist on disk are silently dropped from the search list.
//!
//! # See Also
//!
//! - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)

use std::{
    env,
    path::{Path, PathBuf},
};

/// Fallback for `$XDG_DATA_DIRS`.
pub const DEFAULT_DATA_DIRS: &str = "/usr/local/share/:/usr/share/";

/// Fallback when no temporary directory variable is set.
pub const DEFAULT_TEMP_DIR: &str = "/tmp";

/// Resolved XDG base directories plus the GTK2 rc file override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgDirs {
    /// User's home directory.
    pub home: PathBuf,

    /// `$XDG_CONFIG_HOME`, else `$HOME/.config`.
    pub config_home: PathBuf,

    /// `$XDG_DATA_HOME`, else `$HOME/.local/share`.
    pub data_home: PathBuf,

    /// `$XDG_DATA_DIRS` split on `:`, else [`DEFAULT_DATA_DIRS`].
    pub data_dirs: Vec<PathBuf>,

    /// First entry of `$GTK2_RC_FILES` if set.
    pub gtk2_rc_file: Option<PathBuf>,
}

impl XdgDirs {
    /// Resolve directories from the current process environment.
    ///
    /// # Errors
    ///
    /// - Return [`NoWayHome`] if home directory path cannot be determined.
    pub fn from_env() -> Result<Self> {
        let home = home_dir()?;
        Ok(Self::resolve(home, |name| env::var(name).ok()))
    }

    /// Resolve directories relative to `home` using `lookup` for variables.
    ///
    /// Empty variables count as unset.
    pub fn resolve(home: impl Into<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let home = home.into();
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let config_home = var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".config"));
        let data_home = var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local").join("share"));
        let data_dirs = var("XDG_DATA_DIRS")
            .unwrap_or_else(|| DEFAULT_DATA_DIRS.into())
            .split(':')
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect();
        let gtk2_rc_file = var("GTK2_RC_FILES").and_then(|value| {
            let first = value.split(':').find(|entry| !entry.is_empty())?.to_owned();
            let expanded = shellexpand::tilde_with_context(&first, || Some(home.to_string_lossy()));
            Some(PathBuf::from(expanded.into_owned()))
        });

        Self {
            home,
            config_home,
            data_home,
            data_dirs,
            gtk2_rc_file,
        }
    }

    /// Existing directories to search for theme resources, in precedence
    /// order: data home, then each system data directory.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(&self.data_home)
            .chain(self.data_dirs.iter())
            .filter(|path| path.is_dir())
            .cloned()
            .collect()
    }

    /// Path to GTK3 `settings.ini`.
    pub fn gtk3_settings_ini(&self) -> PathBuf {
        self.config_home.join("gtk-3.0").join("settings.ini")
    }

    /// Path to GTK2 rc file, honoring `$GTK2_RC_FILES`.
    pub fn gtkrc_20(&self) -> PathBuf {
        self.gtk2_rc_file
            .clone()
            .unwrap_or_else(|| self.home.join(".gtkrc-2.0"))
    }

    /// Path to `xsettingsd.conf`.
    pub fn xsettingsd_conf(&self) -> PathBuf {
        self.config_home.join("xsettingsd").join("xsettingsd.conf")
    }

    /// Path to nwg-look preferences.
    pub fn preferences(&self) -> PathBuf {
        self.config_home.join("nwg-look").join("config")
    }

    /// Path to plain-text live-store backup.
    pub fn live_backup(&self) -> PathBuf {
        self.data_home.join("nwg-look").join("gsettings")
    }

    /// Candidate user icon folders in probing order.
    pub fn icon_folder_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![
            self.home.join(".icons"),
            self.data_home.join("icons"),
            self.home.join(".local").join("share").join("icons"),
        ];
        candidates.dedup();
        candidates
    }

    /// First existing user icon folder, if any.
    pub fn icon_folder(&self) -> Option<PathBuf> {
        self.icon_folder_candidates()
            .into_iter()
            .find(|path| path.is_dir())
    }
}

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(NoWayHome)
}

/// Determine temporary directory.
///
/// Checks `$TMPDIR`, `$TEMP`, then `$TMP`, falling back to
/// [`DEFAULT_TEMP_DIR`].
pub fn temp_dir() -> PathBuf {
    temp_dir_with(|name| env::var(name).ok())
}

pub(crate) fn temp_dir_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    ["TMPDIR", "TEMP", "TMP"]
        .into_iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(DEFAULT_TEMP_DIR).to_path_buf())
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;
    use std::{collections::HashMap, fs::create_dir_all};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn resolve_defaults_under_home() {
        let result = XdgDirs::resolve("/home/blah", lookup(&[]));
        let expect = XdgDirs {
            home: "/home/blah".into(),
            config_home: "/home/blah/.config".into(),
            data_home: "/home/blah/.local/share".into(),
            data_dirs: vec!["/usr/local/share/".into(), "/usr/share/".into()],
            gtk2_rc_file: None,
        };
        assert_eq!(result, expect);
    }

    #[test]
    fn resolve_environment_overrides() {
        let result = XdgDirs::resolve(
            "/home/blah",
            lookup(&[
                ("XDG_CONFIG_HOME", "/cfg"),
                ("XDG_DATA_HOME", "/data"),
                ("XDG_DATA_DIRS", "/opt/share:/usr/share"),
                ("GTK2_RC_FILES", "~/.config/gtk-2.0/gtkrc:/etc/gtk-2.0/gtkrc"),
            ]),
        );
        assert_eq!(result.config_home, PathBuf::from("/cfg"));
        assert_eq!(result.data_home, PathBuf::from("/data"));
        assert_eq!(
            result.data_dirs,
            vec![PathBuf::from("/opt/share"), PathBuf::from("/usr/share")]
        );
        assert_eq!(
            result.gtkrc_20(),
            PathBuf::from("/home/blah/.config/gtk-2.0/gtkrc")
        );
    }

    #[test]
    fn resolve_treats_empty_variables_as_unset() {
        let result = XdgDirs::resolve(
            "/home/blah",
            lookup(&[("XDG_CONFIG_HOME", ""), ("GTK2_RC_FILES", "")]),
        );
        assert_eq!(result.config_home, PathBuf::from("/home/blah/.config"));
        assert_eq!(result.gtkrc_20(), PathBuf::from("/home/blah/.gtkrc-2.0"));
    }

    #[sealed_test]
    fn search_dirs_drop_missing_directories() -> anyhow::Result<()> {
        let root = std::env::current_dir()?;
        create_dir_all(root.join("home/.local/share"))?;
        create_dir_all(root.join("system"))?;

        let dirs = XdgDirs {
            home: root.join("home"),
            config_home: root.join("home/.config"),
            data_home: root.join("home/.local/share"),
            data_dirs: vec![root.join("missing"), root.join("system")],
            gtk2_rc_file: None,
        };
        assert_eq!(
            dirs.search_dirs(),
            vec![root.join("home/.local/share"), root.join("system")]
        );

        Ok(())
    }

    #[sealed_test(env = [("XDG_CONFIG_HOME", "/blah/config")])]
    fn from_env_reads_process_environment() -> anyhow::Result<()> {
        let dirs = XdgDirs::from_env()?;
        assert_eq!(
            dirs.preferences(),
            PathBuf::from("/blah/config/nwg-look/config")
        );

        Ok(())
    }

    #[test]
    fn temp_dir_priority() {
        let result = temp_dir_with(lookup(&[("TEMP", "/b"), ("TMP", "/c")]));
        assert_eq!(result, PathBuf::from("/b"));

        let result = temp_dir_with(lookup(&[("TMPDIR", "/a"), ("TEMP", "/b")]));
        assert_eq!(result, PathBuf::from("/a"));

        let result = temp_dir_with(lookup(&[("TMPDIR", "")]));
        assert_eq!(result, PathBuf::from("/tmp"));
    }
}
