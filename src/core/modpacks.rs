// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::core::types::{Modpack, ModpackItem};

const NEW_MODPACK_NAME: &str = "NewModpack";

/// The user's modpacks, in creation order
#[derive(Debug, Clone, Default)]
pub struct ModpackList {
    modpacks: Vec<Modpack>,
}

impl ModpackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.modpacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modpacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modpack> {
        self.modpacks.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Modpack> {
        self.modpacks.iter().find(|m| m.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Modpack> {
        match self.modpacks.iter_mut().find(|m| m.name == name) {
            Some(m) => Ok(m),
            None => bail!("No modpack named '{}'", name),
        }
    }

    /// Modpacks ordered for display, by name ignoring case
    pub fn sorted(&self) -> Vec<&Modpack> {
        let mut view: Vec<&Modpack> = self.modpacks.iter().collect();
        view.sort_by_key(|m| m.name.to_lowercase());
        view
    }

    /// Append a modpack; names must be unique
    pub fn push(&mut self, modpack: Modpack) -> Result<()> {
        if self.get(&modpack.name).is_some() {
            bail!("A modpack named '{}' already exists", modpack.name);
        }
        self.modpacks.push(modpack);
        Ok(())
    }

    /// First unused name of the form NewModpack1, NewModpack2, ...
    pub fn next_modpack_name(&self) -> String {
        (1..)
            .map(|n| format!("{}{}", NEW_MODPACK_NAME, n))
            .find(|name| self.get(name).is_none())
            .unwrap_or_else(|| NEW_MODPACK_NAME.to_string())
    }

    /// Create an empty modpack with a generated name
    pub fn create_new(&mut self) -> String {
        let name = self.next_modpack_name();
        log::info!("Created modpack '{}'", name);
        self.modpacks.push(Modpack::new(name.clone()));
        name
    }

    pub fn add_mod(&mut self, modpack: &str, mod_name: &str) -> Result<bool> {
        let target = self.get_mut(modpack)?;
        let item = ModpackItem::Mod(mod_name.to_string());
        if target.contains(&item) {
            return Ok(false);
        }
        target.items.push(item);
        Ok(true)
    }

    /// Reference one modpack from another
    ///
    /// Self references and references that would make a cycle are rejected.
    pub fn add_modpack(&mut self, modpack: &str, child: &str) -> Result<bool> {
        if self.get(child).is_none() {
            bail!("No modpack named '{}'", child);
        }
        if modpack == child {
            bail!("A modpack cannot contain itself");
        }
        if self.reachable_modpacks(child).contains(modpack) {
            bail!("'{}' already contains '{}'", child, modpack);
        }

        let target = self.get_mut(modpack)?;
        let item = ModpackItem::Modpack(child.to_string());
        if target.contains(&item) {
            return Ok(false);
        }
        target.items.push(item);
        Ok(true)
    }

    pub fn remove_item(&mut self, modpack: &str, item: &ModpackItem) -> Result<bool> {
        let target = self.get_mut(modpack)?;
        let before = target.items.len();
        target.items.retain(|i| i != item);
        Ok(target.items.len() != before)
    }

    /// Rename a modpack and every reference to it
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            bail!("Modpack name cannot be empty");
        }
        if old == new {
            return Ok(());
        }
        if self.get(new).is_some() {
            bail!("A modpack named '{}' already exists", new);
        }

        self.get_mut(old)?.name = new.to_string();
        let old_ref = ModpackItem::Modpack(old.to_string());
        for modpack in &mut self.modpacks {
            for item in &mut modpack.items {
                if *item == old_ref {
                    *item = ModpackItem::Modpack(new.to_string());
                }
            }
        }

        log::info!("Renamed modpack '{}' to '{}'", old, new);
        Ok(())
    }

    /// Delete a modpack and every reference to it
    pub fn delete(&mut self, name: &str) -> Result<Modpack> {
        let index = match self.modpacks.iter().position(|m| m.name == name) {
            Some(i) => i,
            None => bail!("No modpack named '{}'", name),
        };
        let removed = self.modpacks.remove(index);

        let reference = ModpackItem::Modpack(name.to_string());
        for modpack in &mut self.modpacks {
            modpack.items.retain(|i| *i != reference);
        }

        log::info!("Deleted modpack '{}'", name);
        Ok(removed)
    }

    /// Drop a mod from every modpack
    pub fn forget_mod(&mut self, mod_name: &str) -> usize {
        let reference = ModpackItem::Mod(mod_name.to_string());
        let mut removed = 0;
        for modpack in &mut self.modpacks {
            let before = modpack.items.len();
            modpack.items.retain(|i| *i != reference);
            removed += before - modpack.items.len();
        }
        removed
    }

    /// Names of every modpack reachable from `name`, including itself
    fn reachable_modpacks(&self, name: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![name.to_string()];

        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(modpack) = self.get(&current) {
                for item in &modpack.items {
                    if let ModpackItem::Modpack(child) = item {
                        stack.push(child.clone());
                    }
                }
            }
        }
        seen
    }

    /// Every mod name a modpack contains, directly or through other modpacks
    pub fn resolve_mods(&self, name: &str) -> Vec<String> {
        let mut mods = Vec::new();
        let mut seen_mods = HashSet::new();
        let mut seen_packs = HashSet::new();
        self.collect_mods(name, &mut seen_packs, &mut seen_mods, &mut mods);
        mods
    }

    fn collect_mods(
        &self,
        name: &str,
        seen_packs: &mut HashSet<String>,
        seen_mods: &mut HashSet<String>,
        out: &mut Vec<String>,
    ) {
        if !seen_packs.insert(name.to_string()) {
            return;
        }
        let Some(modpack) = self.get(name) else {
            return;
        };

        for item in &modpack.items {
            match item {
                ModpackItem::Mod(m) => {
                    if seen_mods.insert(m.clone()) {
                        out.push(m.clone());
                    }
                }
                ModpackItem::Modpack(child) => self.collect_mods(child, seen_packs, seen_mods, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(names: &[&str]) -> ModpackList {
        let mut list = ModpackList::new();
        for name in names {
            list.push(Modpack::new(*name)).unwrap();
        }
        list
    }

    #[test]
    fn test_next_modpack_name_fills_gaps() {
        let mut list = ModpackList::new();
        assert_eq!(list.create_new(), "NewModpack1");
        assert_eq!(list.create_new(), "NewModpack2");
        list.rename("NewModpack1", "Bobs").unwrap();
        assert_eq!(list.next_modpack_name(), "NewModpack1");
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut list = list_with(&["a", "b", "c"]);
        assert!(list.add_modpack("a", "b").unwrap());
        assert!(list.add_modpack("b", "c").unwrap());
        assert!(list.add_modpack("c", "a").is_err());
        assert!(list.add_modpack("a", "a").is_err());
        assert!(list.add_modpack("a", "missing").is_err());
        // Duplicate reference is a no-op
        assert!(!list.add_modpack("a", "b").unwrap());
    }

    #[test]
    fn test_resolve_mods_is_transitive_and_deduplicated() {
        let mut list = list_with(&["base", "extra", "all"]);
        list.add_mod("base", "bobores").unwrap();
        list.add_mod("base", "boblibrary").unwrap();
        list.add_mod("extra", "bobores").unwrap();
        list.add_mod("extra", "angelsrefining").unwrap();
        list.add_modpack("all", "base").unwrap();
        list.add_modpack("all", "extra").unwrap();
        list.add_mod("all", "helmod").unwrap();

        assert_eq!(
            list.resolve_mods("all"),
            vec!["bobores", "boblibrary", "angelsrefining", "helmod"]
        );
        assert!(list.resolve_mods("missing").is_empty());
    }

    #[test]
    fn test_rename_and_delete_update_references() {
        let mut list = list_with(&["inner", "outer"]);
        list.add_modpack("outer", "inner").unwrap();

        assert!(list.rename("outer", "inner").is_err());
        assert!(list.rename("outer", "  ").is_err());
        list.rename("inner", "core").unwrap();
        assert_eq!(
            list.get("outer").unwrap().items,
            vec![ModpackItem::Modpack("core".to_string())]
        );

        list.delete("core").unwrap();
        assert!(list.get("outer").unwrap().items.is_empty());
        assert!(list.delete("core").is_err());
    }

    #[test]
    fn test_forget_mod_and_sorted_view() {
        let mut list = list_with(&["beta", "Alpha"]);
        list.add_mod("beta", "x").unwrap();
        list.add_mod("Alpha", "x").unwrap();
        list.add_mod("Alpha", "y").unwrap();

        assert_eq!(list.forget_mod("x"), 2);
        assert!(list.remove_item("Alpha", &ModpackItem::Mod("y".to_string())).unwrap());
        let sorted = list.sorted();
        let names: Vec<&str> = sorted.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }
}
