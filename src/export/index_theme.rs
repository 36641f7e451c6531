// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Default cursor theme descriptor.
//!
//! X11 applications that ignore GTK settings still fall back to the `default`
//! icon theme when picking a cursor. Pointing its `Inherits` entry at the
//! chosen cursor theme makes them agree with everything else.

use crate::{export::Export, path::XdgDirs, settings::SettingsRecord};

use std::path::PathBuf;
use tracing::warn;

/// `<icons folder>/default/index.theme`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexTheme;

impl Export for IndexTheme {
    fn name(&self) -> &'static str {
        "index.theme"
    }

    fn target(&self, dirs: &XdgDirs) -> Option<PathBuf> {
        let Some(folder) = dirs.icon_folder() else {
            warn!("no user icons folder found, skip index.theme");
            return None;
        };

        Some(folder.join("default").join("index.theme"))
    }

    fn render(&self, record: &SettingsRecord, _dirs: &XdgDirs) -> Vec<String> {
        vec![
            "# This file is written by nwg-look. Do not edit.".to_owned(),
            "[Icon Theme]".to_owned(),
            "Name=Default".to_owned(),
            "Comment=Default Cursor Theme".to_owned(),
            format!("Inherits={}", record.cursor_theme),
        ]
    }
}
