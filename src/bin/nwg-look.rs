// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use nwg_look::{
    app::{AppState, ApplyReport},
    path::XdgDirs,
    store::Gsettings,
};

use anyhow::{bail, Result};
use clap::Parser;
use inquire::Confirm;
use std::process::exit;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GTK3 settings editor for wlroots based compositors.
///
/// Without options, load current settings and list discovered themes.
#[derive(Debug, Clone, Parser)]
#[command(about, long_about, disable_version_flag = true)]
struct Cli {
    /// Turn on debug messages.
    #[arg(short, long)]
    pub debug: bool,

    /// Display version information.
    #[arg(short, long)]
    pub version: bool,

    /// Apply stored gsettings and quit.
    #[arg(short, long, group = "action")]
    pub apply: bool,

    /// Restore default values and quit.
    #[arg(short, long, group = "action")]
    pub restore: bool,

    /// Export config files and quit.
    #[arg(short = 'x', long, group = "action")]
    pub export: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        if self.version {
            println!("nwg-look version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let dirs = XdgDirs::from_env()?;
        let store = Gsettings::new();

        if self.apply {
            run_apply(dirs, &store)
        } else if self.restore {
            run_restore(dirs, &store)
        } else if self.export {
            run_export(dirs, &store)
        } else {
            run_show(dirs, &store)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(false)
        .without_time();
    let level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = cli.run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run_apply(dirs: XdgDirs, store: &Gsettings) -> Result<()> {
    let backup = dirs.live_backup();
    if !backup.exists() {
        bail!("{:?} not found, nothing to apply", backup.display());
    }

    let mut state = AppState::new(dirs);
    let failed = state.apply_backup(store)?;
    if !failed.is_empty() {
        warn!("failed to apply: {}", failed.join(", "));
    }

    Ok(())
}

fn run_restore(dirs: XdgDirs, store: &Gsettings) -> Result<()> {
    let confirmed = Confirm::new("Restore default gtk settings?")
        .with_default(false)
        .prompt()?;
    if !confirmed {
        info!("restore cancelled");
        return Ok(());
    }

    let mut state = AppState::load(dirs, store);
    let report = state.restore_defaults(store);
    log_report(&report);

    Ok(())
}

fn run_export(dirs: XdgDirs, store: &Gsettings) -> Result<()> {
    let state = AppState::load(dirs, store);
    let (written, failed) = state.export_files();
    for path in &written {
        info!("wrote {:?}", path.display());
    }

    if !failed.is_empty() {
        warn!("failed to export: {}", failed.join(", "));
    }

    Ok(())
}

fn run_show(dirs: XdgDirs, store: &Gsettings) -> Result<()> {
    let state = AppState::load(dirs, store);
    let settings = state.settings();

    println!("widget theme:      {}", settings.widget_theme);
    println!("icon theme:        {}", settings.icon_theme);
    println!("cursor theme:      {} ({}px)", settings.cursor_theme, settings.cursor_size);
    println!("font:              {}", settings.font_name);
    println!(
        "font rendering:    hinting {}, antialiasing {}, subpixel order {}",
        settings.font_hinting, settings.font_antialiasing, settings.font_rgba_order
    );
    println!("text scaling:      {}", settings.text_scaling_factor);
    println!("color scheme:      {}", settings.color_scheme);
    println!(
        "toolbar:           {}, {} icons",
        settings.toolbar_style, settings.toolbar_icon_size
    );
    println!(
        "sounds:            event {}, input feedback {}",
        settings.event_sounds, settings.input_feedback_sounds
    );

    println!("\nwidget themes:");
    for name in state.widget_themes() {
        println!("  {name}");
    }

    println!("\nicon themes:");
    for name in state.icon_themes().sorted_names() {
        println!("  {name}");
    }

    println!("\ncursor themes:");
    for name in state.cursor_themes().themes.sorted_names() {
        println!("  {name}");
    }

    Ok(())
}

fn log_report(report: &ApplyReport) {
    for path in &report.written {
        info!("wrote {:?}", path.display());
    }

    if !report.live_failures.is_empty() {
        warn!("failed to apply: {}", report.live_failures.join(", "));
    }

    if !report.failed_exports.is_empty() {
        warn!("failed to export: {}", report.failed_exports.join(", "));
    }
}
