// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

mod gui;

use std::path::Path;

use clap::Parser;
use eframe::egui;
use egui::IconData;
use factorio_mod_manager::core::{app_data_path, GameVersion, Session, SETTINGS_FILE};
use gui::ModManagerApp;

/// Manage Factorio mods and modpacks
#[derive(Debug, Parser)]
#[command(name = "factorio-mod-manager")]
struct Args {
    /// Start this Factorio version directly instead of opening the window
    #[arg(short = 'v', long = "factorio-version")]
    factorio_version: Option<GameVersion>,

    /// Modpack to enable exclusively before starting the game
    #[arg(short = 'p', long = "modpack", requires = "factorio_version")]
    modpack: Option<String>,
}

fn load_icon() -> Option<IconData> {
    let icon_path = Path::new("assets/icon.png");

    if !icon_path.exists() {
        log::warn!("Icon file not found at {:?}", icon_path);
        return None;
    }

    let image = match image::ImageReader::open(icon_path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => match reader.decode() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Failed to decode icon file: {}", e);
                return None;
            }
        },
        Err(e) => {
            log::warn!("Failed to open icon file: {}", e);
            return None;
        }
    };

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// Shortcut mode: select a version, enable a modpack and start the game
fn launch(version: GameVersion, modpack: Option<&str>) -> anyhow::Result<()> {
    let app_data = app_data_path();
    let mut session = Session::open(&app_data.join(SETTINGS_FILE), &app_data)?;
    session.launch(version, modpack)?;
    Ok(())
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(Some(env_logger::TimestampPrecision::Seconds))
        .init();

    let args = Args::parse();

    if let Some(version) = args.factorio_version {
        if let Err(e) = launch(version, args.modpack.as_deref()) {
            log::error!("Failed to start Factorio {}: {:#}", version, e);
            std::process::exit(1);
        }
        return Ok(());
    }

    log::info!("=== Factorio Mod Manager Started ===");

    let app_data = app_data_path();
    let session = Session::open(&app_data.join(SETTINGS_FILE), &app_data);
    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 480.0])
            .with_title("Factorio Mod Manager")
            .with_drag_and_drop(true)
            .with_icon(icon.unwrap_or_default()),
        ..Default::default()
    };

    eframe::run_native(
        "Factorio Mod Manager",
        options,
        Box::new(move |cc| Ok(Box::new(ModManagerApp::new(cc, session)))),
    )
}
