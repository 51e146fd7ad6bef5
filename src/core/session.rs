// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Child;

use anyhow::{anyhow, bail, Context, Result};

use crate::core::mods::{delete_mod, load_mods, sort_mods, write_mod_list};
use crate::core::modpacks::ModpackList;
use crate::core::settings::Settings;
use crate::core::templates::ModpackTemplateList;
use crate::core::types::{GameVersion, Mod, ModpackItem};
use crate::core::versions::{get_installed_versions, start_game, FactorioVersion};

/// Application state shared by the front end
///
/// Every change that must outlive the process is written through here:
/// version selection and layout go to the settings file, modpack edits go
/// to the template list.
pub struct Session {
    settings: Settings,
    versions: Vec<FactorioVersion>,
    selected_version: Option<GameVersion>,
    mods: Vec<Mod>,
    modpacks: ModpackList,
    templates: ModpackTemplateList,
}

impl Session {
    /// Load settings, installed versions, mods and modpacks
    pub fn open(settings_file: &Path, app_data: &Path) -> Result<Self> {
        let settings = Settings::load(settings_file, app_data);
        let versions = get_installed_versions(&settings.factorio_directory())?;
        let mods = load_mods(&settings.mod_directory())?;
        let templates = ModpackTemplateList::load(&settings.templates_file())?;

        let mut modpacks = ModpackList::new();
        templates.populate(&mods, &mut modpacks);

        let mut session = Self {
            settings,
            versions,
            selected_version: None,
            mods,
            modpacks,
            templates,
        };
        session.restore_selected_version()?;

        log::info!(
            "Session ready: {} versions, {} mods, {} modpacks",
            session.versions.len(),
            session.mods.len(),
            session.modpacks.len()
        );
        Ok(session)
    }

    fn restore_selected_version(&mut self) -> Result<()> {
        let Some(saved) = self.settings.selected_version else {
            return Ok(());
        };

        if self.versions.iter().any(|v| v.version == saved) {
            self.selected_version = Some(saved);
        } else {
            log::warn!("Previously selected version {} is no longer installed", saved);
            self.settings.selected_version = None;
            self.settings.save()?;
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn versions(&self) -> &[FactorioVersion] {
        &self.versions
    }

    pub fn mods(&self) -> &[Mod] {
        &self.mods
    }

    pub fn modpacks(&self) -> &ModpackList {
        &self.modpacks
    }

    pub fn selected_version(&self) -> Option<&FactorioVersion> {
        let selected = self.selected_version?;
        self.versions.iter().find(|v| v.version == selected)
    }

    /// Mods grouped by game version, newest first
    pub fn mods_by_version(&self) -> Vec<(GameVersion, Vec<&Mod>)> {
        let mut groups: Vec<(GameVersion, Vec<&Mod>)> = Vec::new();
        for m in &self.mods {
            match groups.last_mut() {
                Some((version, group)) if *version == m.factorio_version => group.push(m),
                _ => groups.push((m.factorio_version, vec![m])),
            }
        }
        groups
    }

    // --- Persisted view state ---

    pub fn set_selected_version(&mut self, version: GameVersion) -> Result<()> {
        if self.selected_version == Some(version) {
            return Ok(());
        }
        if !self.versions.iter().any(|v| v.version == version) {
            bail!("Factorio {} is not installed", version);
        }

        self.selected_version = Some(version);
        self.settings.selected_version = Some(version);
        self.settings.save()
    }

    pub fn set_pane_ratio(&mut self, ratio: f32) -> Result<()> {
        let ratio = ratio.clamp(0.1, 0.9);
        if (self.settings.pane_ratio - ratio).abs() < f32::EPSILON {
            return Ok(());
        }
        self.settings.pane_ratio = ratio;
        self.settings.save()
    }

    /// Take the directory options of `settings`, re-link every installation
    /// and reload mods
    ///
    /// The selected version and pane ratio stay as they are in the session.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        self.settings.factorio_directory = settings.factorio_directory;
        self.settings.mod_directory = settings.mod_directory;

        self.reload()?;
        self.settings.selected_version = self.selected_version;
        self.settings.save()?;

        let errors = self.link_mod_directories(true);
        if !errors.is_empty() {
            bail!("Could not link mod folders: {}", errors.join("; "));
        }
        Ok(())
    }

    /// Point every installation's `mods` folder at its managed mod directory
    ///
    /// Returns one message per installation that could not be linked.
    pub fn link_mod_directories(&self, overwrite: bool) -> Vec<String> {
        let mut errors = Vec::new();
        for version in &self.versions {
            let mod_dir = self.settings.get_mod_directory(version.version);
            if let Err(e) = version.create_mod_directory_link(&mod_dir, overwrite) {
                log::error!("Failed to link mods for {}: {:#}", version.version, e);
                errors.push(format!("{}: {:#}", version.version, e));
            }
        }
        errors
    }

    /// Re-read installed versions and mods from disk
    pub fn reload(&mut self) -> Result<()> {
        self.versions = get_installed_versions(&self.settings.factorio_directory())?;
        self.mods = load_mods(&self.settings.mod_directory())?;
        if self
            .selected_version
            .is_some_and(|s| !self.versions.iter().any(|v| v.version == s))
        {
            self.selected_version = None;
        }
        Ok(())
    }

    // --- Mods ---

    /// Merge freshly imported mods into the list
    pub fn install(&mut self, installed: impl IntoIterator<Item = Mod>) {
        for m in installed {
            match self.mods.iter_mut().find(|e| e.file_path == m.file_path) {
                Some(existing) => *existing = m,
                None => self.mods.push(m),
            }
        }
        sort_mods(&mut self.mods);
    }

    fn version_directory(&self, version: GameVersion) -> PathBuf {
        self.settings.get_mod_directory(version)
    }

    fn write_mod_lists(&self, versions: &BTreeSet<GameVersion>) -> Result<()> {
        for version in versions {
            let mods = self.mods.iter().filter(|m| m.factorio_version == *version);
            write_mod_list(&self.version_directory(*version), mods)?;
        }
        Ok(())
    }

    /// Enable or disable a mod in its game version
    ///
    /// mod-list.json is keyed by name, so every copy with that name in the
    /// same version follows.
    pub fn set_mod_active(&mut self, file_path: &Path, active: bool) -> Result<()> {
        let (name, version) = self
            .mods
            .iter()
            .find(|m| m.file_path == file_path)
            .map(|m| (m.name.clone(), m.factorio_version))
            .ok_or_else(|| anyhow!("Unknown mod {:?}", file_path))?;

        let mut changed = false;
        for m in self
            .mods
            .iter_mut()
            .filter(|m| m.name == name && m.factorio_version == version)
        {
            changed |= m.active != active;
            m.active = active;
        }
        if !changed {
            return Ok(());
        }

        self.write_mod_lists(&BTreeSet::from([version]))
    }

    /// Delete a mod from disk; modpacks forget it once no copy remains
    pub fn delete_mod(&mut self, file_path: &Path) -> Result<()> {
        let index = self
            .mods
            .iter()
            .position(|m| m.file_path == file_path)
            .ok_or_else(|| anyhow!("Unknown mod {:?}", file_path))?;

        delete_mod(&self.mods[index])?;
        let removed = self.mods.remove(index);

        if !self.mods.iter().any(|m| m.name == removed.name) {
            let dropped = self.modpacks.forget_mod(&removed.name);
            if dropped > 0 {
                self.sync_templates()?;
            }
        }
        Ok(())
    }

    /// Enable every mod a modpack resolves to
    ///
    /// With `exclusive`, other mods of the affected game versions are disabled.
    pub fn activate_modpack(&mut self, name: &str, exclusive: bool) -> Result<usize> {
        if self.modpacks.get(name).is_none() {
            bail!("No modpack named '{}'", name);
        }
        let names: BTreeSet<String> = self.modpacks.resolve_mods(name).into_iter().collect();

        let mut versions = BTreeSet::new();
        for m in self.mods.iter().filter(|m| names.contains(&m.name)) {
            versions.insert(m.factorio_version);
        }

        let mut enabled = 0;
        for m in self.mods.iter_mut().filter(|m| versions.contains(&m.factorio_version)) {
            if names.contains(&m.name) {
                m.active = true;
                enabled += 1;
            } else if exclusive {
                m.active = false;
            }
        }

        self.write_mod_lists(&versions)?;
        log::info!("Activated modpack '{}': {} mods enabled", name, enabled);
        Ok(enabled)
    }

    // --- Modpacks ---

    fn sync_templates(&mut self) -> Result<()> {
        self.templates.update(&self.modpacks);
        self.templates.save()
    }

    pub fn create_modpack(&mut self) -> Result<String> {
        let name = self.modpacks.create_new();
        self.sync_templates()?;
        Ok(name)
    }

    pub fn rename_modpack(&mut self, old: &str, new: &str) -> Result<()> {
        self.modpacks.rename(old, new)?;
        self.sync_templates()
    }

    pub fn delete_modpack(&mut self, name: &str) -> Result<()> {
        self.modpacks.delete(name)?;
        self.sync_templates()
    }

    pub fn add_mod_to_modpack(&mut self, modpack: &str, mod_name: &str) -> Result<()> {
        if !self.mods.iter().any(|m| m.name == mod_name) {
            bail!("Mod '{}' is not installed", mod_name);
        }
        if self.modpacks.add_mod(modpack, mod_name)? {
            self.sync_templates()?;
        }
        Ok(())
    }

    pub fn add_modpack_to_modpack(&mut self, modpack: &str, child: &str) -> Result<()> {
        if self.modpacks.add_modpack(modpack, child)? {
            self.sync_templates()?;
        }
        Ok(())
    }

    pub fn remove_from_modpack(&mut self, modpack: &str, item: &ModpackItem) -> Result<()> {
        if self.modpacks.remove_item(modpack, item)? {
            self.sync_templates()?;
        }
        Ok(())
    }

    // --- Game ---

    pub fn start_game(&self) -> Result<Child> {
        let version = self
            .selected_version()
            .ok_or_else(|| anyhow!("No Factorio version selected"))?;
        start_game(version, &[])
    }

    /// Select a version, optionally activate a modpack exclusively, then start
    ///
    /// A version without a patch number picks the newest matching install.
    pub fn launch(&mut self, version: GameVersion, modpack: Option<&str>) -> Result<Child> {
        let installed = self
            .versions
            .iter()
            .find(|v| match version.patch {
                Some(_) => v.version == version,
                None => v.version.to_mod_version() == version,
            })
            .map(|v| v.version)
            .with_context(|| format!("Factorio {} is not installed", version))?;

        self.set_selected_version(installed)?;
        if let Some(name) = modpack {
            self.activate_modpack(name, true)?;
        }
        self.start_game()
    }
}
