// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use zip::ZipArchive;

use crate::core::types::{GameVersion, Mod};

/// Errors raised while validating a mod archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open archive: {0}")]
    Io(#[from] io::Error),
    #[error("not a valid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive does not contain an info.json")]
    MissingInfo,
    #[error("info.json is malformed: {0}")]
    MalformedInfo(#[from] serde_json::Error),
    #[error("info.json does not declare a factorio_version")]
    MissingGameVersion,
    #[error("{0}")]
    InvalidGameVersion(#[from] crate::core::types::ParseVersionError),
}

/// The subset of a mod's info.json this tool cares about
#[derive(Debug, Clone, Deserialize)]
pub struct ModInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub factorio_version: Option<String>,
}

impl ModInfo {
    /// The declared game version, truncated to major.minor
    pub fn game_version(&self) -> Result<GameVersion, ArchiveError> {
        let raw = self
            .factorio_version
            .as_deref()
            .ok_or(ArchiveError::MissingGameVersion)?;
        Ok(raw.parse::<GameVersion>()?.to_mod_version())
    }
}

/// Check whether a file name looks like an importable mod archive
pub fn is_mod_archive(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    if !lower.ends_with(".zip") {
        return false;
    }

    !(lower.starts_with('~')
        || lower.starts_with('.')
        || lower.contains(".part")
        || lower.contains(".tmp")
        || lower.contains(".crdownload"))
}

/// info.json sits either at the archive root or inside the mod's top folder
fn is_info_entry(entry_name: &str) -> bool {
    let trimmed = entry_name.trim_start_matches('/');
    match trimmed.split_once('/') {
        None => trimmed == "info.json",
        Some((_, rest)) => rest == "info.json",
    }
}

/// Read info.json out of a mod archive
pub fn read_mod_info(path: &Path) -> Result<ModInfo, ArchiveError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let entry_name = archive
        .file_names()
        .find(|name| is_info_entry(name))
        .map(str::to_string)
        .ok_or(ArchiveError::MissingInfo)?;

    let mut content = String::new();
    archive.by_name(&entry_name)?.read_to_string(&mut content)?;

    // Some authoring tools save info.json with a byte order mark
    let info: ModInfo = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
    Ok(info)
}

/// Validate an archive and return the major.minor game version it targets
pub fn archive_game_version(path: &Path) -> Result<GameVersion, ArchiveError> {
    read_mod_info(path)?.game_version()
}

/// Build a `Mod` for an archive already sitting in its version directory
pub fn load_mod(path: &Path) -> Result<Mod, ArchiveError> {
    let info = read_mod_info(path)?;
    let factorio_version = info.game_version()?;
    let size = fs::metadata(path)?.len();

    log::debug!(
        "Read {} {} (factorio {}) from {:?}",
        info.name,
        info.version,
        factorio_version,
        path
    );

    Ok(Mod {
        name: info.name,
        title: info.title,
        version: info.version,
        factorio_version,
        file_path: path.to_path_buf(),
        size,
        active: false,
    })
}
