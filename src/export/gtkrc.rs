// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! GTK2 `.gtkrc-2.0` sink.

use crate::{
    export::{flag, Export},
    path::XdgDirs,
    settings::SettingsRecord,
};

use std::path::PathBuf;

/// Header written above every generated `.gtkrc-2.0`.
pub const GTKRC_HEADER: [&str; 3] = [
    "# DO NOT EDIT! This file will be overwritten by nwg-look.",
    "# Any customization should be done in ~/.gtkrc-2.0.mine instead.",
    "",
];

/// GTK2 `gtkrc` file.
///
/// String values are quoted. The file includes `~/.gtkrc-2.0.mine` so user
/// customization survives regeneration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gtkrc20;

impl Export for Gtkrc20 {
    fn name(&self) -> &'static str {
        ".gtkrc-2.0"
    }

    fn target(&self, dirs: &XdgDirs) -> Option<PathBuf> {
        Some(dirs.gtkrc_20())
    }

    fn render(&self, record: &SettingsRecord, dirs: &XdgDirs) -> Vec<String> {
        let mut lines: Vec<String> = GTKRC_HEADER.iter().map(|line| line.to_string()).collect();
        lines.extend([
            format!(
                "include \"{}\"",
                dirs.home.join(".gtkrc-2.0.mine").display()
            ),
            format!("gtk-theme-name=\"{}\"", record.widget_theme),
            format!("gtk-icon-theme-name=\"{}\"", record.icon_theme),
            format!("gtk-font-name=\"{}\"", record.font_name),
            format!("gtk-cursor-theme-name=\"{}\"", record.cursor_theme),
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
            format!("gtk-xft-hintstyle=\"{}\"", record.font_hinting.hint_style()),
            format!("gtk-xft-rgba=\"{}\"", record.font_rgba_order),
        ]);

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        export::tests::dirs_under,
        settings::{FontHinting, RgbaOrder, ToolbarIconSize, ToolbarStyle},
    };
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn render_gtkrc() {
        let record = SettingsRecord {
            widget_theme: "Arc-Dark".into(),
            font_name: "Cantarell 11".into(),
            cursor_size: 32,
            toolbar_style: ToolbarStyle::Icons,
            toolbar_icon_size: ToolbarIconSize::Small,
            menu_images: true,
            font_hinting: FontHinting::Slight,
            font_rgba_order: RgbaOrder::Vbgr,
            ..SettingsRecord::default()
        };

        let mut result = Gtkrc20
            .render(&record, &dirs_under(Path::new("/root")))
            .join("\n");
        result.push('\n');

        let expect = indoc! {r#"
            # DO NOT EDIT! This file will be overwritten by nwg-look.
            # Any customization should be done in ~/.gtkrc-2.0.mine instead.

            include "/root/home/.gtkrc-2.0.mine"
            gtk-theme-name="Arc-Dark"
            gtk-icon-theme-name="Adwaita"
            gtk-font-name="Cantarell 11"
            gtk-cursor-theme-name="Adwaita"
            gtk-cursor-theme-size=32
            gtk-toolbar-style=GTK_TOOLBAR_ICONS
            gtk-toolbar-icon-size=GTK_ICON_SIZE_SMALL_TOOLBAR
            gtk-button-images=0
            gtk-menu-images=1
            gtk-enable-event-sounds=1
            gtk-enable-input-feedback-sounds=0
            gtk-xft-antialias=1
            gtk-xft-hinting=1
            gtk-xft-hintstyle="hintslight"
            gtk-xft-rgba="vbgr"
        "#};
        assert_eq!(result, expect);
    }

    #[test]
    fn target_honors_rc_override() {
        let mut dirs = dirs_under(Path::new("/root"));
        assert_eq!(
            Gtkrc20.target(&dirs),
            Some(PathBuf::from("/root/home/.gtkrc-2.0"))
        );

        dirs.gtk2_rc_file = Some(PathBuf::from("/etc/gtk-2.0/gtkrc"));
        assert_eq!(
            Gtkrc20.target(&dirs),
            Some(PathBuf::from("/etc/gtk-2.0/gtkrc"))
        );
    }
}
