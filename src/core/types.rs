// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A game version such as `0.15` or `0.15.40`
///
/// Field order matters for the derived ordering; `0.15` sorts before `0.15.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl GameVersion {
    pub const fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        Self { major, minor, patch }
    }

    /// The major.minor part, which is what mod directories are keyed by
    pub fn to_mod_version(self) -> Self {
        Self {
            patch: None,
            ..self
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid game version")]
pub struct ParseVersionError(pub String);

impl FromStr for GameVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(err());
        }

        let mut numbers = Vec::with_capacity(3);
        for part in parts {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(err());
            }
            numbers.push(part.parse::<u32>().map_err(|_| err())?);
        }

        Ok(Self::new(numbers[0], numbers[1], numbers.get(2).copied()))
    }
}

impl TryFrom<String> for GameVersion {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameVersion> for String {
    fn from(version: GameVersion) -> Self {
        version.to_string()
    }
}

/// A mod archive installed in a per-version mod directory
#[derive(Debug, Clone, PartialEq)]
pub struct Mod {
    pub name: String,
    pub title: String,
    pub version: String,
    pub factorio_version: GameVersion,
    pub file_path: PathBuf,
    pub size: u64,
    pub active: bool,
}

impl Mod {
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Title if the archive declares one, otherwise the internal name
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// An entry inside a modpack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModpackItem {
    Mod(String),
    Modpack(String),
}

impl ModpackItem {
    pub fn display_name(&self) -> &str {
        match self {
            ModpackItem::Mod(name) | ModpackItem::Modpack(name) => name,
        }
    }
}

/// A user-named, ordered grouping of mods and other modpacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modpack {
    pub name: String,
    pub items: Vec<ModpackItem>,
}

impl Modpack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn contains(&self, item: &ModpackItem) -> bool {
        self.items.contains(item)
    }
}

/// Progress reported while importing a batch of archives
#[derive(Debug, Clone)]
pub enum ImportProgress {
    Processing { fraction: f64, file_name: String },
    Installed(Mod),
    Finished,
}

/// Import result
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub installed: Vec<Mod>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_version() {
        assert_eq!("0.15".parse(), Ok(GameVersion::new(0, 15, None)));
        assert_eq!("0.15.40".parse(), Ok(GameVersion::new(0, 15, Some(40))));
        assert!("0".parse::<GameVersion>().is_err());
        assert!("0.15.1.2".parse::<GameVersion>().is_err());
        assert!("0.x".parse::<GameVersion>().is_err());
        assert!("0..1".parse::<GameVersion>().is_err());
        assert!("-1.2".parse::<GameVersion>().is_err());
    }

    #[test]
    fn test_version_ordering_and_display() {
        let older: GameVersion = "0.14.23".parse().unwrap();
        let newer: GameVersion = "0.15".parse().unwrap();
        assert!(older < newer);
        assert_eq!(newer.to_string(), "0.15");
        assert_eq!(older.to_mod_version().to_string(), "0.14");
    }

    #[test]
    fn test_version_serde_as_string() {
        let version = GameVersion::new(0, 16, Some(51));
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"0.16.51\"");
        let back: GameVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<GameVersion>("\"abc\"").is_err());
    }

    #[test]
    fn test_display_title_falls_back_to_name() {
        let mut m = Mod {
            name: "bobores".to_string(),
            title: String::new(),
            version: "0.15.0".to_string(),
            factorio_version: GameVersion::new(0, 15, None),
            file_path: PathBuf::from("/mods/0.15/bobores_0.15.0.zip"),
            size: 0,
            active: false,
        };
        assert_eq!(m.display_title(), "bobores");
        assert_eq!(m.file_name(), "bobores_0.15.0.zip");
        m.title = "Bob's Ores".to_string();
        assert_eq!(m.display_title(), "Bob's Ores");
    }
}
