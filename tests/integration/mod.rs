// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::DesktopFixture;

use anyhow::Result;
use indoc::indoc;
use nwg_look::{
    app::AppState,
    config::Preferences,
    settings::backup::BACKUP_HEADER,
    store::{MemoryStore, INTERFACE_SCHEMA, SOUND_SCHEMA},
};
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use std::fs::{create_dir_all, read_to_string};

fn session_store() -> MemoryStore {
    let store = MemoryStore::new().fail_on(INTERFACE_SCHEMA, "cursor-theme");
    store.insert(INTERFACE_SCHEMA, "gtk-theme", "Materia");
    store.insert(INTERFACE_SCHEMA, "cursor-size", "32");
    store.insert(INTERFACE_SCHEMA, "font-hinting", "slight");
    store.insert(SOUND_SCHEMA, "event-sounds", "false");
    store
}

#[sealed_test]
fn load_merges_ini_then_live_store() -> Result<()> {
    let fixture = DesktopFixture::new(std::env::current_dir()?);
    fixture.write_file(
        "home/.config/gtk-3.0/settings.ini",
        indoc! {r#"
            [Settings]
            gtk-theme-name=Arc
            gtk-font-name=Cantarell 11
            gtk-xft-hintstyle=hintfull
            # keep me
            gtk-xft-dpi=98304
        "#},
    )?;

    let state = AppState::load(fixture.dirs().clone(), &session_store());
    let settings = state.settings();

    assert_eq!(settings.widget_theme, "Materia");
    assert_eq!(settings.font_name, "Cantarell 11");
    assert_eq!(settings.font_hinting.to_string(), "slight");
    assert_eq!(settings.cursor_theme, "Adwaita");
    assert_eq!(settings.cursor_size, 32);
    assert!(!settings.event_sounds);
    assert_eq!(settings.unrecognized_lines, ["# keep me", "gtk-xft-dpi=98304"]);

    let preferences: Preferences = read_to_string(fixture.dirs().preferences())?.parse()?;
    assert_eq!(preferences, Preferences::default());

    Ok(())
}

#[sealed_test]
fn apply_fans_out_to_enabled_sinks() -> Result<()> {
    let fixture = DesktopFixture::new(std::env::current_dir()?);
    create_dir_all(fixture.dirs().home.join(".icons"))?;
    fixture.write_file(
        "home/.config/gtk-3.0/settings.ini",
        "[Settings]\ngtk-made-up-key=foo\n",
    )?;

    let store = session_store();
    let mut state = AppState::load(fixture.dirs().clone(), &store);
    state.set_preferences(Preferences {
        export_gtkrc_20: false,
        ..Preferences::default()
    });
    state.save_preferences()?;

    let report = state.apply(&store);
    assert_eq!(report.live_failures, ["cursor-theme"]);
    assert!(report.backup_saved);
    assert!(report.failed_exports.is_empty());
    assert_eq!(
        report.written,
        [
            fixture.dirs().gtk3_settings_ini(),
            fixture.dirs().home.join(".icons/default/index.theme"),
            fixture.dirs().xsettingsd_conf(),
        ]
    );
    assert!(!fixture.dirs().gtkrc_20().exists());

    let ini = read_to_string(fixture.dirs().gtk3_settings_ini())?;
    assert!(ini.starts_with("[Settings]\ngtk-theme-name=Materia\n"));
    assert!(ini.contains("gtk-cursor-theme-size=32\n"));
    assert!(ini.ends_with("gtk-made-up-key=foo\n"));

    let backup = read_to_string(fixture.dirs().live_backup())?;
    assert!(backup.starts_with(BACKUP_HEADER));
    assert!(backup.contains("\ngtk-theme=Materia\n"));
    assert!(!backup.contains("cursor-theme="));

    Ok(())
}

#[sealed_test]
fn themes_are_selected_by_display_name() -> Result<()> {
    let fixture = DesktopFixture::new(std::env::current_dir()?);
    let themes = fixture.system_data().join("themes");
    let icons = fixture.system_data().join("icons");
    let home_icons = fixture.dirs().home.join(".icons");

    fixture.widget_theme(&themes, "Arc")?;
    fixture.widget_theme(&themes, "Default")?;
    create_dir_all(themes.join("Unmarked/metacity-1"))?;
    fixture.widget_theme(fixture.dirs().home.join(".themes"), "Zuki")?;
    fixture.icon_theme(&icons, "papirus-icons", "Papirus")?;
    fixture.icon_theme(&icons, "hicolor", "Hicolor")?;
    fixture.cursor_theme(&home_icons, "bibata-dir", "Bibata Modern")?;

    let mut state = AppState::load(fixture.dirs().clone(), &MemoryStore::new());
    assert_eq!(state.widget_themes(), ["Arc", "Zuki"]);
    assert_eq!(state.icon_themes().sorted_names(), ["Papirus"]);
    assert_eq!(
        state.cursor_themes().cursor_dirs.get("bibata-dir"),
        Some(&home_icons.join("bibata-dir/cursors"))
    );

    state.select_widget_theme("Zuki")?;
    state.select_icon_theme("Papirus")?;
    state.select_cursor_theme("Bibata Modern")?;

    let store = MemoryStore::new();
    let report = state.apply(&store);
    assert!(report.is_clean());
    assert_eq!(store.value(INTERFACE_SCHEMA, "icon-theme").as_deref(), Some("papirus-icons"));
    assert_eq!(store.value(INTERFACE_SCHEMA, "cursor-theme").as_deref(), Some("bibata-dir"));

    let index = read_to_string(home_icons.join("default/index.theme"))?;
    assert!(index.ends_with("Inherits=bibata-dir\n"));

    let gtkrc = read_to_string(fixture.dirs().gtkrc_20())?;
    assert!(gtkrc.contains("gtk-theme-name=\"Zuki\"\n"));

    Ok(())
}

#[sealed_test]
fn stored_backup_reapplies_to_fresh_session() -> Result<()> {
    let fixture = DesktopFixture::new(std::env::current_dir()?);
    let mut state = AppState::new(fixture.dirs().clone());
    state.settings_mut().widget_theme = "Nordic".into();
    state.settings_mut().cursor_size = 40;
    state.apply(&MemoryStore::new());

    let fresh = MemoryStore::new();
    let failed = AppState::new(fixture.dirs().clone()).apply_backup(&fresh)?;
    assert!(failed.is_empty());
    assert_eq!(fresh.value(INTERFACE_SCHEMA, "gtk-theme").as_deref(), Some("Nordic"));
    assert_eq!(fresh.value(INTERFACE_SCHEMA, "cursor-size").as_deref(), Some("40"));

    Ok(())
}
