// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Settings export to configuration files.
//!
//! Each file sink is a projection of [`SettingsRecord`] onto the naming and
//! value conventions of one consumer:
//!
//! | Sink | Consumer | Path |
//! |---|---|---|
//! | [`SettingsIni`] | GTK3 | `$XDG_CONFIG_HOME/gtk-3.0/settings.ini` |
//! | [`Gtkrc20`] | GTK2 | `$GTK2_RC_FILES` or `~/.gtkrc-2.0` |
//! | [`IndexTheme`] | cursor fallback | `<icons folder>/default/index.theme` |
//! | [`Xsettingsd`] | XSettings daemon | `$XDG_CONFIG_HOME/xsettingsd/xsettingsd.conf` |
//!
//! Rendering is pure. Writing truncates and rewrites the whole file, creating
//! missing parent directories first.

pub mod gtkrc;
pub mod index_theme;
pub mod settings_ini;
pub mod xsettingsd;

pub use gtkrc::Gtkrc20;
pub use index_theme::IndexTheme;
pub use settings_ini::SettingsIni;
pub use xsettingsd::Xsettingsd;

use crate::{path::XdgDirs, settings::SettingsRecord};

use std::{
    fs::write,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// File sink for settings.
pub trait Export {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// File to write, or `None` if the sink has no usable target.
    fn target(&self, dirs: &XdgDirs) -> Option<PathBuf>;

    /// Lines of the file, without line terminators.
    fn render(&self, record: &SettingsRecord, dirs: &XdgDirs) -> Vec<String>;
}

/// Render record through sink and write the result.
///
/// Returns the path written.
///
/// # Errors
///
/// - Return [`ExportError::NoTarget`] if sink has no target.
/// - Return [`ExportError::CreateDir`] if parent directory cannot be created.
/// - Return [`ExportError::Write`] if file cannot be written.
#[instrument(skip_all, fields(sink = sink.name()), level = "debug")]
pub fn export(sink: &dyn Export, record: &SettingsRecord, dirs: &XdgDirs) -> Result<PathBuf> {
    let path = sink
        .target(dirs)
        .ok_or(ExportError::NoTarget(sink.name()))?;
    info!("export {:?}", path.display());

    let lines = sink.render(record, dirs);
    for line in &lines {
        debug!("{line}");
    }
    write_lines(&path, &lines)?;

    Ok(path)
}

/// Write lines to `path`, each followed by a newline.
///
/// # Errors
///
/// - Return [`ExportError::CreateDir`] if parent directory cannot be created.
/// - Return [`ExportError::Write`] if file cannot be written.
pub fn write_lines(path: impl AsRef<Path>, lines: &[String]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        mkdirp::mkdirp(parent).map_err(|err| ExportError::CreateDir {
            source: err,
            path: parent.to_path_buf(),
        })?;
    }

    let content: String = lines.iter().map(|line| format!("{line}\n")).collect();
    write(path, content).map_err(|err| ExportError::Write {
        source: err,
        path: path.to_path_buf(),
    })
}

/// Encode boolean as ini style flag.
pub(crate) fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Export error types.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Sink has nowhere to write.
    #[error("no target path for {0}")]
    NoTarget(&'static str),

    /// Parent directory cannot be created.
    #[error("failed to create directory {:?}", path.display())]
    CreateDir {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// File cannot be written.
    #[error("failed to write {:?}", path.display())]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = ExportError> = std::result::Result<T, E>;
