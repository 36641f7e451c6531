// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Unified appearance settings.
//!
//! GTK appearance settings live in three places that evolve independently:
//! the live settings store of the running session, the GTK3 `settings.ini`
//! file, and nwg-look's own preferences. [`SettingsRecord`] is the single
//! in-memory view of the first two. It starts from documented defaults, is
//! overlaid with whatever `settings.ini` holds, and is finally overlaid with
//! every live-store key that could be read.
//!
//! # Vocabularies
//!
//! Several settings are spelled differently depending on where they are
//! written. Font hinting is `medium` in the live store but `hintmedium` in
//! every file sink. Toolbar style is `both-horiz` in the live store but
//! `GTK_TOOLBAR_BOTH_HORIZ` in GTK rc syntax. The keyword enums in this module
//! own both spellings so that sinks never deal with raw strings.

pub mod backup;
pub mod ini;
pub mod live;

use crate::settings::ini::GtkIni;

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use tracing::{debug, warn};

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $keyword:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Keyword used by the live store.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $keyword),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownKeyword;

            fn from_str(keyword: &str) -> Result<Self, Self::Err> {
                match keyword {
                    $($keyword => Ok($name::$variant),)+
                    _ => Err(UnknownKeyword(keyword.into())),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
                fmt.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Font hinting level.
    FontHinting {
        None => "none",
        Slight => "slight",
        #[default]
        Medium => "medium",
        Full => "full",
    }
}

keyword_enum! {
    /// Font antialiasing mode.
    FontAntialiasing {
        None => "none",
        #[default]
        Grayscale => "grayscale",
        Rgba => "rgba",
    }
}

keyword_enum! {
    /// Subpixel order, only meaningful with [`FontAntialiasing::Rgba`].
    RgbaOrder {
        #[default]
        Rgb => "rgb",
        Bgr => "bgr",
        Vrgb => "vrgb",
        Vbgr => "vbgr",
    }
}

keyword_enum! {
    /// Preferred color scheme.
    ColorScheme {
        #[default]
        Default => "default",
        PreferDark => "prefer-dark",
        PreferLight => "prefer-light",
    }
}

keyword_enum! {
    /// Legacy toolbar style.
    ToolbarStyle {
        Icons => "icons",
        Text => "text",
        Both => "both",
        #[default]
        BothHoriz => "both-horiz",
    }
}

keyword_enum! {
    /// Legacy toolbar icon size.
    ToolbarIconSize {
        Small => "small",
        #[default]
        Large => "large",
    }
}

impl FontHinting {
    /// Hint style keyword used by file sinks.
    pub fn hint_style(&self) -> &'static str {
        match self {
            Self::Slight => "hintslight",
            Self::Medium => "hintmedium",
            Self::Full => "hintfull",
            Self::None => "hintnone",
        }
    }

    /// Parse hint style keyword back into hinting level.
    pub fn from_hint_style(style: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|hinting| hinting.hint_style() == style)
    }

    /// Whether any hinting is applied at all.
    pub fn is_enabled(&self) -> bool {
        *self != Self::None
    }
}

impl FontAntialiasing {
    /// Whether any antialiasing is applied at all.
    pub fn is_enabled(&self) -> bool {
        *self != Self::None
    }
}

impl ColorScheme {
    /// Whether the legacy prefer-dark-theme flag should be set.
    pub fn prefers_dark(&self) -> bool {
        *self == Self::PreferDark
    }
}

impl ToolbarStyle {
    /// GTK rc enum name.
    pub fn gtk_name(&self) -> &'static str {
        match self {
            Self::Icons => "GTK_TOOLBAR_ICONS",
            Self::Text => "GTK_TOOLBAR_TEXT",
            Self::Both => "GTK_TOOLBAR_BOTH",
            Self::BothHoriz => "GTK_TOOLBAR_BOTH_HORIZ",
        }
    }

    /// Parse GTK rc enum name.
    pub fn from_gtk_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.gtk_name() == name)
    }
}

impl ToolbarIconSize {
    /// GTK rc enum name.
    pub fn gtk_name(&self) -> &'static str {
        match self {
            Self::Small => "GTK_ICON_SIZE_SMALL_TOOLBAR",
            Self::Large => "GTK_ICON_SIZE_LARGE_TOOLBAR",
        }
    }

    /// Parse GTK rc enum name.
    pub fn from_gtk_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|size| size.gtk_name() == name)
    }
}

/// Unified appearance settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRecord {
    /// Widget theme name.
    pub widget_theme: String,

    /// Icon theme folder name.
    pub icon_theme: String,

    /// Cursor theme folder name, empty if undiscoverable.
    pub cursor_theme: String,

    /// Cursor size in pixels. Zero leaves the live size untouched.
    pub cursor_size: u32,

    /// Font description, e.g. "Sans 10".
    pub font_name: String,
    pub font_hinting: FontHinting,
    pub font_antialiasing: FontAntialiasing,
    pub font_rgba_order: RgbaOrder,
    pub text_scaling_factor: f64,

    pub toolbar_style: ToolbarStyle,
    pub toolbar_icon_size: ToolbarIconSize,

    /// Deprecated.
    pub button_images: bool,

    /// Deprecated.
    pub menu_images: bool,

    pub event_sounds: bool,
    pub input_feedback_sounds: bool,
    pub color_scheme: ColorScheme,

    /// Lines of the last read `settings.ini` that are not modeled here.
    ///
    /// # Invariant
    ///
    /// - Never holds a line starting with a recognized `settings.ini` key.
    pub unrecognized_lines: Vec<String>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            widget_theme: "Adwaita".into(),
            icon_theme: "Adwaita".into(),
            cursor_theme: "Adwaita".into(),
            cursor_size: 24,
            font_name: "Sans 10".into(),
            font_hinting: FontHinting::default(),
            font_antialiasing: FontAntialiasing::default(),
            font_rgba_order: RgbaOrder::default(),
            text_scaling_factor: 1.0,
            toolbar_style: ToolbarStyle::default(),
            toolbar_icon_size: ToolbarIconSize::default(),
            button_images: false,
            menu_images: false,
            event_sounds: true,
            input_feedback_sounds: false,
            color_scheme: ColorScheme::default(),
            unrecognized_lines: Vec::new(),
        }
    }
}

impl SettingsRecord {
    /// Legacy prefer-dark-theme flag, derived from color scheme.
    pub fn application_prefer_dark_theme(&self) -> bool {
        self.color_scheme.prefers_dark()
    }

    /// Overlay values read from `settings.ini`.
    ///
    /// Only values that were present and understood are applied. The file's
    /// unrecognized lines replace the current set.
    pub fn merge_ini(&mut self, ini: &GtkIni) {
        if let Some(name) = &ini.theme_name {
            self.widget_theme.clone_from(name);
        }
        if let Some(name) = &ini.icon_theme_name {
            self.icon_theme.clone_from(name);
        }
        if let Some(name) = &ini.font_name {
            self.font_name.clone_from(name);
        }
        if let Some(name) = &ini.cursor_theme_name {
            self.cursor_theme.clone_from(name);
        }
        if ini.cursor_theme_size > 0 {
            self.cursor_size = ini.cursor_theme_size as u32;
        }

        if let Some(value) = &ini.toolbar_style {
            match ToolbarStyle::from_gtk_name(value) {
                Some(style) => self.toolbar_style = style,
                None => warn!(
                    "unknown gtk-toolbar-style {value:?}, keeping {}",
                    self.toolbar_style
                ),
            }
        }
        if let Some(value) = &ini.toolbar_icon_size {
            match ToolbarIconSize::from_gtk_name(value) {
                Some(size) => self.toolbar_icon_size = size,
                None => warn!(
                    "unknown gtk-toolbar-icon-size {value:?}, keeping {}",
                    self.toolbar_icon_size
                ),
            }
        }

        merge_flag(&mut self.button_images, ini.button_images);
        merge_flag(&mut self.menu_images, ini.menu_images);
        merge_flag(&mut self.event_sounds, ini.enable_event_sounds);
        merge_flag(
            &mut self.input_feedback_sounds,
            ini.enable_input_feedback_sounds,
        );

        if let Some(style) = &ini.xft_hintstyle {
            match FontHinting::from_hint_style(style) {
                Some(hinting) => self.font_hinting = hinting,
                None => warn!(
                    "unknown gtk-xft-hintstyle {style:?}, keeping {}",
                    self.font_hinting
                ),
            }
        }
        if ini.xft_hinting == 0 {
            self.font_hinting = FontHinting::None;
        }

        if let Some(value) = &ini.xft_rgba {
            match value.parse::<RgbaOrder>() {
                Ok(order) => self.font_rgba_order = order,
                Err(_) => debug!("gtk-xft-rgba {value:?} carries no subpixel order"),
            }
        }
        match ini.xft_antialias {
            0 => self.font_antialiasing = FontAntialiasing::None,
            1 if !self.font_antialiasing.is_enabled() => {
                self.font_antialiasing = FontAntialiasing::Grayscale
            }
            _ => {}
        }

        match ini.application_prefer_dark_theme {
            Some(true) => self.color_scheme = ColorScheme::PreferDark,
            Some(false) if self.color_scheme.prefers_dark() => {
                self.color_scheme = ColorScheme::Default
            }
            _ => {}
        }

        self.unrecognized_lines = ini
            .unrecognized_lines
            .iter()
            .filter(|line| !ini::is_recognized(line))
            .cloned()
            .collect();
    }
}

fn merge_flag(target: &mut bool, value: Option<bool>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Value is not a keyword of the expected vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown keyword {0:?}")]
pub struct UnknownKeyword(pub String);
