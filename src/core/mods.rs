// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::archive::{is_mod_archive, load_mod};
use crate::core::types::{GameVersion, Mod};

pub const MOD_LIST_FILE: &str = "mod-list.json";

/// One entry of the game's mod-list.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModListEntry {
    pub name: String,
    #[serde(with = "enabled_flag")]
    pub enabled: bool,
}

/// The game's mod-list.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModList {
    #[serde(default)]
    pub mods: Vec<ModListEntry>,
}

/// Older game versions write `"enabled": "true"` as a string
mod enabled_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        })
    }
}

impl ModList {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.mods.iter().any(|m| m.name == name && m.enabled)
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        match self.mods.iter_mut().find(|m| m.name == name) {
            Some(entry) => entry.enabled = enabled,
            None => self.mods.push(ModListEntry {
                name: name.to_string(),
                enabled,
            }),
        }
    }
}

/// Read the mod-list.json of a version directory; missing means empty
pub fn read_mod_list(version_dir: &Path) -> Result<ModList> {
    let path = version_dir.join(MOD_LIST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ModList::default()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", path)),
    };

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Write the enabled state of `mods` into a version directory's mod-list.json
///
/// Entries for mods not in `mods` (such as `base`) keep their current state.
/// A mod-list.json that cannot be parsed is replaced, so its other entries
/// are lost; the game rebuilds those on its next start.
pub fn write_mod_list<'a>(version_dir: &Path, mods: impl IntoIterator<Item = &'a Mod>) -> Result<()> {
    let mut list = read_mod_list(version_dir).unwrap_or_else(|e| {
        log::warn!("Rewriting unreadable mod list: {:#}", e);
        ModList::default()
    });

    if !list.mods.iter().any(|m| m.name == "base") {
        list.mods.insert(
            0,
            ModListEntry {
                name: "base".to_string(),
                enabled: true,
            },
        );
    }

    for m in mods {
        list.set_enabled(&m.name, m.active);
    }

    fs::create_dir_all(version_dir)
        .with_context(|| format!("Failed to create directory: {:?}", version_dir))?;
    let path = version_dir.join(MOD_LIST_FILE);
    let json = serde_json::to_string_pretty(&list).context("Failed to serialize mod list")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

    log::debug!("Wrote {} entries to {:?}", list.mods.len(), path);
    Ok(())
}

/// Sort mods newest game version first, then by name
pub fn sort_mods(mods: &mut [Mod]) {
    mods.sort_by(|a, b| {
        b.factorio_version
            .cmp(&a.factorio_version)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.version.cmp(&b.version))
    });
}

/// Collect version directories (`<major.minor>`) under the mod root
fn version_directories(mod_root: &Path) -> Result<Vec<(GameVersion, PathBuf)>> {
    let entries = match fs::read_dir(mod_root) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {:?}", mod_root))
        }
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        match name.parse::<GameVersion>() {
            Ok(version) if version.patch.is_none() => dirs.push((version, entry.path())),
            _ => log::debug!("Ignoring non-version folder {:?}", entry.path()),
        }
    }
    Ok(dirs)
}

/// Load every mod under the mod root
pub fn load_mods(mod_root: &Path) -> Result<Vec<Mod>> {
    let dirs = version_directories(mod_root)?;

    let mut mods: Vec<Mod> = dirs
        .par_iter()
        .flat_map(|(version, dir)| {
            let entries = match fs::read_dir(dir) {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Failed to read folder {:?}: {}", dir, e);
                    return Vec::new();
                }
            };

            let mod_list = read_mod_list(dir).unwrap_or_else(|e| {
                log::warn!("{:#}", e);
                ModList::default()
            });

            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .filter(|e| is_mod_archive(&e.file_name().to_string_lossy()))
                .filter_map(|entry| match load_mod(&entry.path()) {
                    Ok(mut m) => {
                        if m.factorio_version != *version {
                            log::warn!(
                                "{} targets {} but sits in the {} folder",
                                m.file_name(),
                                m.factorio_version,
                                version
                            );
                        }
                        m.active = mod_list.is_enabled(&m.name);
                        Some(m)
                    }
                    Err(e) => {
                        log::warn!("Skipping {:?}: {}", entry.path(), e);
                        None
                    }
                })
                .collect::<Vec<Mod>>()
        })
        .collect();

    sort_mods(&mut mods);
    log::info!("Loaded {} mods from {:?}", mods.len(), mod_root);
    Ok(mods)
}

/// Remove a mod archive from disk
pub fn delete_mod(m: &Mod) -> Result<()> {
    fs::remove_file(&m.file_path)
        .with_context(|| format!("Failed to delete mod file: {:?}", m.file_path))?;
    log::info!("Deleted mod {} ({:?})", m.name, m.file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_mod(dir: &Path, name: &str, factorio: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(format!("{}_1.0.0.zip", name));
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(format!("{}_1.0.0/info.json", name), SimpleFileOptions::default())
            .unwrap();
        write!(
            zip,
            r#"{{"name":"{}","version":"1.0.0","factorio_version":"{}"}}"#,
            name, factorio
        )
        .unwrap();
        zip.finish().unwrap();
        path
    }

    #[test]
    fn test_mod_list_accepts_string_flags() {
        let list: ModList = serde_json::from_str(
            r#"{"mods":[{"name":"base","enabled":"true"},{"name":"a","enabled":false},{"name":"b","enabled":"false"}]}"#,
        )
        .unwrap();
        assert!(list.is_enabled("base"));
        assert!(!list.is_enabled("a"));
        assert!(!list.is_enabled("b"));
        assert!(!list.is_enabled("missing"));
    }

    #[test]
    fn test_load_mods_reads_active_state() {
        let dir = tempdir().unwrap();
        let v15 = dir.path().join("0.15");
        let v16 = dir.path().join("0.16");
        write_mod(&v15, "zeta", "0.15");
        write_mod(&v15, "Alpha", "0.15");
        write_mod(&v16, "alpha", "0.16");
        fs::write(v15.join("readme.txt"), "x").unwrap();
        fs::write(v15.join("broken.zip"), "x").unwrap();
        fs::create_dir_all(dir.path().join("not-a-version")).unwrap();
        fs::write(
            v15.join(MOD_LIST_FILE),
            r#"{"mods":[{"name":"base","enabled":true},{"name":"zeta","enabled":true}]}"#,
        )
        .unwrap();

        let mods = load_mods(dir.path()).unwrap();
        let summary: Vec<(String, String, bool)> = mods
            .iter()
            .map(|m| (m.factorio_version.to_string(), m.name.clone(), m.active))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("0.16".to_string(), "alpha".to_string(), false),
                ("0.15".to_string(), "Alpha".to_string(), false),
                ("0.15".to_string(), "zeta".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_write_mod_list_preserves_unknown_entries() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MOD_LIST_FILE),
            r#"{"mods":[{"name":"other","enabled":true}]}"#,
        )
        .unwrap();

        let path = write_mod(dir.path(), "alpha", "0.15");
        let mut m = load_mod(&path).unwrap();
        m.active = true;
        write_mod_list(dir.path(), [&m]).unwrap();

        let list = read_mod_list(dir.path()).unwrap();
        let names: Vec<&str> = list.mods.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["base", "other", "alpha"]);
        assert!(list.is_enabled("base"));
        assert!(list.is_enabled("other"));
        assert!(list.is_enabled("alpha"));
    }

    #[test]
    fn test_write_mod_list_replaces_unreadable_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MOD_LIST_FILE), "{ broken").unwrap();

        let path = write_mod(dir.path(), "alpha", "0.15");
        let m = load_mod(&path).unwrap();
        write_mod_list(dir.path(), [&m]).unwrap();

        let list = read_mod_list(dir.path()).unwrap();
        let names: Vec<&str> = list.mods.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["base", "alpha"]);
        assert!(!list.is_enabled("alpha"));
    }

    #[test]
    fn test_missing_root_and_delete() {
        let dir = tempdir().unwrap();
        assert!(load_mods(&dir.path().join("missing")).unwrap().is_empty());

        let path = write_mod(&dir.path().join("0.15"), "alpha", "0.15");
        let m = load_mod(&path).unwrap();
        delete_mod(&m).unwrap();
        assert!(!path.exists());
        assert!(delete_mod(&m).is_err());
    }
}
