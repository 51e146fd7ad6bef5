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

use crate::core::modpacks::ModpackList;
use crate::core::types::{Mod, Modpack, ModpackItem};

/// Persisted form of a single modpack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModpackTemplate {
    pub name: String,
    #[serde(default)]
    pub mods: Vec<String>,
    #[serde(default)]
    pub modpacks: Vec<String>,
}

/// Modpack membership persisted across restarts (modpacks.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModpackTemplateList {
    #[serde(default)]
    modpacks: Vec<ModpackTemplate>,

    #[serde(skip)]
    file: PathBuf,
}

impl ModpackTemplateList {
    /// Load templates from a file, creating an empty file if there is none
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read modpack templates: {:?}", path))?;
            let mut list: ModpackTemplateList = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse modpack templates: {:?}", path))?;
            list.file = path.to_path_buf();

            log::info!("Loaded {} modpack templates from {:?}", list.modpacks.len(), path);
            Ok(list)
        } else {
            let list = ModpackTemplateList {
                modpacks: Vec::new(),
                file: path.to_path_buf(),
            };
            list.save()?;
            log::info!("Created empty modpack template file {:?}", path);
            Ok(list)
        }
    }

    pub fn templates(&self) -> &[ModpackTemplate] {
        &self.modpacks
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Build modpacks from the templates
    ///
    /// Names that no longer match a known mod or modpack are dropped.
    pub fn populate(&self, mods: &[Mod], modpacks: &mut ModpackList) {
        for template in &self.modpacks {
            let mut modpack = Modpack::new(template.name.clone());
            for mod_name in &template.mods {
                let item = ModpackItem::Mod(mod_name.clone());
                if !mods.iter().any(|m| &m.name == mod_name) {
                    log::warn!("Modpack '{}': mod '{}' is not installed", template.name, mod_name);
                    continue;
                }
                if !modpack.contains(&item) {
                    modpack.items.push(item);
                }
            }

            if let Err(e) = modpacks.push(modpack) {
                log::warn!("Skipping template: {}", e);
            }
        }

        for template in &self.modpacks {
            for child in &template.modpacks {
                if let Err(e) = modpacks.add_modpack(&template.name, child) {
                    log::warn!("Modpack '{}': dropping reference to '{}': {}", template.name, child, e);
                }
            }
        }
    }

    /// Replace the templates with the current modpack state
    pub fn update(&mut self, modpacks: &ModpackList) {
        self.modpacks = modpacks
            .iter()
            .map(|modpack| {
                let mut template = ModpackTemplate {
                    name: modpack.name.clone(),
                    ..Default::default()
                };
                for item in &modpack.items {
                    match item {
                        ModpackItem::Mod(name) => template.mods.push(name.clone()),
                        ModpackItem::Modpack(name) => template.modpacks.push(name.clone()),
                    }
                }
                template
            })
            .collect();
    }

    /// Save the templates to their file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create folder: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize modpack templates")?;
        fs::write(&self.file, json)
            .with_context(|| format!("Failed to write modpack templates: {:?}", self.file))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GameVersion;
    use tempfile::tempdir;

    fn installed(name: &str) -> Mod {
        Mod {
            name: name.to_string(),
            title: String::new(),
            version: "1.0.0".to_string(),
            factorio_version: GameVersion::new(0, 15, None),
            file_path: PathBuf::from(format!("{}_1.0.0.zip", name)),
            size: 0,
            active: false,
        }
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modpacks.json");

        let list = ModpackTemplateList::load(&path).unwrap();
        assert!(list.templates().is_empty());
        assert!(path.exists());

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "Modpacks": [] }));
    }

    #[test]
    fn test_populate_skips_unknown_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modpacks.json");
        fs::write(
            &path,
            r#"{"Modpacks":[
                {"Name":"Bobs","Mods":["bobores","gone"],"Modpacks":[]},
                {"Name":"All","Mods":["helmod"],"Modpacks":["Bobs","Missing"]}
            ]}"#,
        )
        .unwrap();

        let list = ModpackTemplateList::load(&path).unwrap();
        let mods = vec![installed("bobores"), installed("helmod")];
        let mut modpacks = ModpackList::new();
        list.populate(&mods, &mut modpacks);

        assert_eq!(modpacks.len(), 2);
        assert_eq!(
            modpacks.get("Bobs").unwrap().items,
            vec![ModpackItem::Mod("bobores".to_string())]
        );
        assert_eq!(
            modpacks.get("All").unwrap().items,
            vec![
                ModpackItem::Mod("helmod".to_string()),
                ModpackItem::Modpack("Bobs".to_string()),
            ]
        );
    }

    #[test]
    fn test_populate_drops_cyclic_reference() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modpacks.json");
        fs::write(
            &path,
            r#"{"Modpacks":[
                {"Name":"A","Mods":[],"Modpacks":["B"]},
                {"Name":"B","Mods":[],"Modpacks":["A"]}
            ]}"#,
        )
        .unwrap();

        let mut modpacks = ModpackList::new();
        ModpackTemplateList::load(&path).unwrap().populate(&[], &mut modpacks);
        assert_eq!(modpacks.get("A").unwrap().items.len(), 1);
        assert!(modpacks.get("B").unwrap().items.is_empty());
    }

    #[test]
    fn test_update_and_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modpacks.json");
        let mut list = ModpackTemplateList::load(&path).unwrap();

        let mut modpacks = ModpackList::new();
        modpacks.push(Modpack::new("Inner")).unwrap();
        modpacks.push(Modpack::new("Outer")).unwrap();
        modpacks.add_mod("Outer", "helmod").unwrap();
        modpacks.add_modpack("Outer", "Inner").unwrap();
        modpacks.add_mod("Outer", "bobores").unwrap();

        list.update(&modpacks);
        list.save().unwrap();

        let reloaded = ModpackTemplateList::load(&path).unwrap();
        assert_eq!(
            reloaded.templates()[1],
            ModpackTemplate {
                name: "Outer".to_string(),
                mods: vec!["helmod".to_string(), "bobores".to_string()],
                modpacks: vec!["Inner".to_string()],
            }
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modpacks.json");
        fs::write(&path, "[").unwrap();
        assert!(ModpackTemplateList::load(&path).is_err());
    }
}
