// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use anyhow::{bail, Context, Result};

use crate::core::types::GameVersion;

#[cfg(windows)]
const EXECUTABLE: &str = "factorio.exe";
#[cfg(not(windows))]
const EXECUTABLE: &str = "factorio";

/// An installed copy of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorioVersion {
    pub version: GameVersion,
    pub directory: PathBuf,
    pub executable_path: PathBuf,
}

impl FactorioVersion {
    /// Inspect a directory and return the version installed there, if any
    pub fn from_directory(directory: &Path) -> Option<Self> {
        let name = directory.file_name()?.to_string_lossy().to_string();
        let version = name.parse::<GameVersion>().ok()?;

        let executable_path = directory.join("bin").join("x64").join(EXECUTABLE);
        if !executable_path.is_file() {
            log::debug!("Skipping {:?}: no game executable", directory);
            return None;
        }

        Some(Self {
            version,
            directory: directory.to_path_buf(),
            executable_path,
        })
    }

    /// The `mods` folder the game reads from
    pub fn mods_link_path(&self) -> PathBuf {
        self.directory.join("mods")
    }

    /// Point this installation's `mods` folder at a managed mod directory
    pub fn create_mod_directory_link(&self, mod_directory: &Path, overwrite: bool) -> Result<()> {
        create_mod_directory_link(&self.mods_link_path(), mod_directory, overwrite)
    }
}

/// Find installed versions, newest first
pub fn get_installed_versions(factorio_dir: &Path) -> Result<Vec<FactorioVersion>> {
    let entries = match fs::read_dir(factorio_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Factorio directory {:?} does not exist yet", factorio_dir);
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read directory: {:?}", factorio_dir))
        }
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(version) = FactorioVersion::from_directory(&entry.path()) {
            versions.push(version);
        }
    }

    versions.sort_by(|a, b| b.version.cmp(&a.version));
    log::info!("Found {} installed Factorio versions", versions.len());
    Ok(versions)
}

fn is_link(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

#[cfg(unix)]
fn make_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(windows)]
fn remove_dir_link(link: &Path) -> io::Result<()> {
    fs::remove_dir(link)
}

#[cfg(not(windows))]
fn remove_dir_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

/// Create a directory link at `link` pointing to `target`
///
/// The target is created if missing. An existing link is only replaced when
/// `overwrite` is set; a real directory at `link` is never touched.
pub fn create_mod_directory_link(link: &Path, target: &Path, overwrite: bool) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create mod directory: {:?}", target))?;

    if is_link(link) {
        if !overwrite {
            log::debug!("Mod link {:?} already exists", link);
            return Ok(());
        }
        remove_dir_link(link).with_context(|| format!("Failed to remove old link: {:?}", link))?;
    } else if link.exists() {
        bail!("{:?} is a real directory, refusing to replace it with a link", link);
    }

    make_dir_link(target, link)
        .with_context(|| format!("Failed to link {:?} -> {:?}", link, target))?;
    log::info!("Linked {:?} -> {:?}", link, target);
    Ok(())
}

/// Launch the game with optional extra arguments
pub fn start_game(version: &FactorioVersion, args: &[String]) -> Result<Child> {
    log::info!("Starting Factorio {} ({:?})", version.version, version.executable_path);

    Command::new(&version.executable_path)
        .args(args)
        .current_dir(&version.directory)
        .spawn()
        .with_context(|| format!("Failed to start {:?}", version.executable_path))
}
