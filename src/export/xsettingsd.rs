// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! XSettings daemon sink.

use crate::{
    export::{flag, Export},
    path::XdgDirs,
    settings::SettingsRecord,
};

use std::path::PathBuf;

/// `xsettingsd.conf`, flat `Name value` lines with quoted strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Xsettingsd;

impl Export for Xsettingsd {
    fn name(&self) -> &'static str {
        "xsettingsd.conf"
    }

    fn target(&self, dirs: &XdgDirs) -> Option<PathBuf> {
        Some(dirs.xsettingsd_conf())
    }

    fn render(&self, record: &SettingsRecord, _dirs: &XdgDirs) -> Vec<String> {
        vec![
            format!("Net/ThemeName \"{}\"", record.widget_theme),
            format!("Net/IconThemeName \"{}\"", record.icon_theme),
            format!("Gtk/CursorThemeName \"{}\"", record.cursor_theme),
            format!("Gtk/CursorThemeSize {}", record.cursor_size),
            format!("Gtk/FontName \"{}\"", record.font_name),
            format!("Net/EnableEventSounds {}", flag(record.event_sounds)),
            format!(
                "Net/EnableInputFeedbackSounds {}",
                flag(record.input_feedback_sounds)
            ),
            format!(
                "Xft/Antialias {}",
                flag(record.font_antialiasing.is_enabled())
            ),
            format!("Xft/Hinting {}", flag(record.font_hinting.is_enabled())),
            format!("Xft/HintStyle \"{}\"", record.font_hinting.hint_style()),
            format!("Xft/RGBA \"{}\"", record.font_rgba_order),
        ]
    }
}
