// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! GTK3 settings editor for wlroots based compositors.
//!
//! Under a GNOME session, GTK3 reads its appearance settings from the
//! session's gsettings store. Elsewhere the same settings must also reach
//! `settings.ini`, `.gtkrc-2.0`, the default cursor theme, and the XSettings
//! daemon, or applications disagree with each other.
//!
//! The library discovers installed themes, merges settings from every
//! source into one [`settings::SettingsRecord`], and fans edits back out to
//! all sinks. See [`app::AppState`] for the entry point.

pub mod app;
pub mod catalog;
pub mod config;
pub mod export;
pub mod path;
pub mod settings;
pub mod store;
