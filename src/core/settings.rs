// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::types::GameVersion;

pub const APP_DIR_NAME: &str = "FactorioModManager";
pub const SETTINGS_FILE: &str = "settings.json";
pub const TEMPLATES_FILE: &str = "modpacks.json";

/// Where a managed directory lives
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path")]
pub enum DirectoryOption {
    #[default]
    AppData,
    ApplicationDirectory,
    Custom(PathBuf),
}

impl DirectoryOption {
    fn resolve(&self, app_data: &Path, app_dir: &Path, leaf: &str) -> PathBuf {
        match self {
            DirectoryOption::AppData => app_data.join(leaf),
            DirectoryOption::ApplicationDirectory => app_dir.join(leaf),
            DirectoryOption::Custom(path) => path.clone(),
        }
    }
}

fn default_pane_ratio() -> f32 {
    0.5
}

/// Persistent application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub selected_version: Option<GameVersion>,
    #[serde(default)]
    pub factorio_directory: DirectoryOption,
    #[serde(default)]
    pub mod_directory: DirectoryOption,
    /// Share of the main window given to the mod list
    #[serde(default = "default_pane_ratio")]
    pub pane_ratio: f32,

    #[serde(skip)]
    file: PathBuf,
    #[serde(skip)]
    app_data: PathBuf,
}

impl Settings {
    /// Default settings bound to a settings file and app data directory
    pub fn new(file: &Path, app_data: &Path) -> Self {
        Self {
            selected_version: None,
            factorio_directory: DirectoryOption::default(),
            mod_directory: DirectoryOption::default(),
            pane_ratio: default_pane_ratio(),
            file: file.to_path_buf(),
            app_data: app_data.to_path_buf(),
        }
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(file: &Path, app_data: &Path) -> Self {
        let mut settings = match fs::read_to_string(file) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Settings file {:?} is invalid, using defaults: {}", file, e);
                    Settings::new(file, app_data)
                }
            },
            Err(_) => {
                log::info!("No settings file at {:?}, using defaults", file);
                Settings::new(file, app_data)
            }
        };

        settings.file = file.to_path_buf();
        settings.app_data = app_data.to_path_buf();
        settings.pane_ratio = settings.pane_ratio.clamp(0.1, 0.9);
        settings
    }

    /// Save settings to their file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings folder: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(&self.file, json)
            .with_context(|| format!("Failed to write settings file: {:?}", self.file))?;

        log::debug!("Saved settings to {:?}", self.file);
        Ok(())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn app_data(&self) -> &Path {
        &self.app_data
    }

    /// Root directory holding one folder per installed game version
    pub fn factorio_directory(&self) -> PathBuf {
        self.factorio_directory
            .resolve(&self.app_data, &application_directory(), "Factorio")
    }

    /// Root directory holding one mod folder per game version
    pub fn mod_directory(&self) -> PathBuf {
        self.mod_directory
            .resolve(&self.app_data, &application_directory(), "mods")
    }

    /// Mod folder for a game version, keyed by major.minor
    pub fn get_mod_directory(&self, version: GameVersion) -> PathBuf {
        self.mod_directory()
            .join(version.to_mod_version().to_string())
    }

    pub fn templates_file(&self) -> PathBuf {
        self.app_data.join(TEMPLATES_FILE)
    }
}

/// Per-user data directory for this application
pub fn app_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(application_directory)
        .join(APP_DIR_NAME)
}

/// Directory containing the running executable
pub fn application_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("settings.json");
        let settings = Settings::load(&file, dir.path());

        assert_eq!(settings, Settings::new(&file, dir.path()));
        assert_eq!(settings.mod_directory(), dir.path().join("mods"));
        assert_eq!(settings.factorio_directory(), dir.path().join("Factorio"));
        assert!(!file.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::new(&file, dir.path());
        settings.selected_version = Some(GameVersion::new(0, 15, Some(40)));
        settings.mod_directory = DirectoryOption::Custom(dir.path().join("my-mods"));
        settings.pane_ratio = 0.3;
        settings.save().unwrap();

        let reloaded = Settings::load(&file, dir.path());
        assert_eq!(reloaded, settings);
        assert_eq!(
            reloaded.get_mod_directory(GameVersion::new(0, 15, Some(40))),
            dir.path().join("my-mods").join("0.15")
        );
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, "{ not json").unwrap();

        let settings = Settings::load(&file, dir.path());
        assert_eq!(settings.selected_version, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, r#"{"selected_version":"0.16","pane_ratio":5.0}"#).unwrap();

        let settings = Settings::load(&file, dir.path());
        assert_eq!(settings.selected_version, Some(GameVersion::new(0, 16, None)));
        assert_eq!(settings.mod_directory, DirectoryOption::AppData);
        assert_eq!(settings.pane_ratio, 0.9);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, r#"{"selected_version":"0.15.40","selected_language":"de"}"#).unwrap();

        let settings = Settings::load(&file, dir.path());
        assert_eq!(settings.selected_version, Some(GameVersion::new(0, 15, Some(40))));

        settings.save().unwrap();
        assert!(!fs::read_to_string(&file).unwrap().contains("selected_language"));
    }
}
