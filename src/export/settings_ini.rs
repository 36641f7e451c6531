// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! GTK3 `settings.ini` sink.

use crate::{
    export::{flag, Export},
    path::XdgDirs,
    settings::{ini::is_recognized, SettingsRecord},
};

use std::path::PathBuf;

/// GTK3 `settings.ini`.
///
/// Recognized keys come first, followed by every preserved foreign line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsIni;

impl Export for SettingsIni {
    fn name(&self) -> &'static str {
        "settings.ini"
    }

    fn target(&self, dirs: &XdgDirs) -> Option<PathBuf> {
        Some(dirs.gtk3_settings_ini())
    }

    fn render(&self, record: &SettingsRecord, _dirs: &XdgDirs) -> Vec<String> {
        let mut lines = vec![
            "[Settings]".to_owned(),
            format!("gtk-theme-name={}", record.widget_theme),
            format!("gtk-icon-theme-name={}", record.icon_theme),
            format!("gtk-font-name={}", record.font_name),
            format!("gtk-cursor-theme-name={}", record.cursor_theme),
            format!("gtk-cursor-theme-size={}", record.cursor_size),
            format!("gtk-toolbar-style={}", record.toolbar_style.gtk_name()),
            format!(
                "gtk-toolbar-icon-size={}",
                record.toolbar_icon_size.gtk_name()
            ),
            format!("gtk-button-images={}", flag(record.button_images)),
            format!("gtk-menu-images={}", flag(record.menu_images)),
            format!("gtk-enable-event-sounds={}", flag(record.event_sounds)),
            format!(
                "gtk-enable-input-feedback-sounds={}",
                flag(record.input_feedback_sounds)
            ),
            format!(
                "gtk-xft-antialias={}",
                flag(record.font_antialiasing.is_enabled())
            ),
            format!("gtk-xft-hinting={}", flag(record.font_hinting.is_enabled())),
            format!("gtk-xft-hintstyle={}", record.font_hinting.hint_style()),
            format!("gtk-xft-rgba={}", record.font_rgba_order),
            format!(
                "gtk-application-prefer-dark-theme={}",
                flag(record.application_prefer_dark_theme())
            ),
        ];

        lines.extend(
            record
                .unrecognized_lines
                .iter()
                .filter(|line| !line.is_empty() && !is_recognized(line))
                .cloned(),
        );

        lines
    }
}
