// Copyright (C) 2025 Berkay Yetgin
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::archive::{archive_game_version, load_mod};
use crate::core::settings::Settings;
use crate::core::types::{ImportProgress, ImportResult, Mod};

/// Move a file, falling back to copy + remove when a rename is not possible
/// (e.g. across drives)
pub fn move_file(source: &Path, destination: &Path) -> Result<(), String> {
    if destination.exists() {
        return Err(format!("{:?} already exists", destination));
    }

    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }

    fs::copy(source, destination).map_err(|e| format!("Failed to copy file: {}", e))?;
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(format!("Failed to remove source after copy: {}", e));
    }
    Ok(())
}

/// Validate a single archive and move it into its version directory
fn install_mod_file(file: &Path, settings: &Settings) -> Result<Mod, String> {
    let file_name = file
        .file_name()
        .ok_or_else(|| format!("Not a file: {:?}", file))?;

    let version = archive_game_version(file).map_err(|e| format!("{:?}: {}", file_name, e))?;

    let version_dir = settings.get_mod_directory(version);
    fs::create_dir_all(&version_dir)
        .map_err(|e| format!("Failed to create mod folder {:?}: {}", version_dir, e))?;

    let destination = version_dir.join(file_name);
    move_file(file, &destination)?;

    load_mod(&destination).map_err(|e| format!("{:?}: {}", destination, e))
}

/// Import a batch of mod archives into the managed mod directory
///
/// Files are processed in order. Invalid archives are skipped and reported
/// in the result; they never abort the batch.
pub fn add_mods(
    files: &[PathBuf],
    settings: &Settings,
    progress_callback: Option<&dyn Fn(ImportProgress)>,
) -> ImportResult {
    let mut result = ImportResult::default();
    let total = files.len();
    let report = |p: ImportProgress| {
        if let Some(cb) = progress_callback {
            cb(p);
        }
    };

    for (i, file) in files.iter().enumerate() {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        report(ImportProgress::Processing {
            fraction: i as f64 / total as f64,
            file_name: file_name.clone(),
        });

        match install_mod_file(file, settings) {
            Ok(m) => {
                log::info!("Installed {} for Factorio {}", file_name, m.factorio_version);
                report(ImportProgress::Installed(m.clone()));
                result.installed.push(m);
            }
            Err(e) => {
                log::warn!("Skipped {}: {}", file_name, e);
                result.skipped.push(file_name);
                result.errors.push(e);
            }
        }
    }

    report(ImportProgress::Processing {
        fraction: 1.0,
        file_name: String::new(),
    });
    report(ImportProgress::Finished);

    log::info!(
        "Import complete: {} installed, {} skipped",
        result.installed.len(),
        result.skipped.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_mod(path: &Path, info: &str) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file("m/info.json", SimpleFileOptions::default()).unwrap();
        zip.write_all(info.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_move_file_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        assert!(move_file(&a, &b).is_err());
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");

        let c = dir.path().join("c");
        move_file(&a, &c).unwrap();
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(&c).unwrap(), "a");
    }

    #[test]
    fn test_add_mods_reports_progress() {
        let dir = tempdir().unwrap();
        let downloads = dir.path().join("downloads");
        fs::create_dir(&downloads).unwrap();
        let settings = Settings::new(&dir.path().join("settings.json"), dir.path());

        let good = downloads.join("good_1.0.0.zip");
        write_mod(&good, r#"{"name":"good","version":"1.0.0","factorio_version":"0.15.3"}"#);
        let bad = downloads.join("bad.zip");
        write_mod(&bad, r#"{"name":"bad"}"#);

        let events = RefCell::new(Vec::new());
        let record = |p: ImportProgress| {
            let label = match p {
                ImportProgress::Processing { fraction, file_name } => {
                    format!("{:.1} {}", fraction, file_name)
                }
                ImportProgress::Installed(m) => format!("installed {}", m.name),
                ImportProgress::Finished => "finished".to_string(),
            };
            events.borrow_mut().push(label);
        };

        let result = add_mods(&[good.clone(), bad.clone()], &settings, Some(&record));

        assert_eq!(
            events.into_inner(),
            vec![
                "0.0 good_1.0.0.zip",
                "installed good",
                "0.5 bad.zip",
                "1.0 ",
                "finished",
            ]
        );
        assert_eq!(result.installed.len(), 1);
        assert_eq!(result.skipped, vec!["bad.zip".to_string()]);
        assert_eq!(result.errors.len(), 1);

        let installed = dir.path().join("mods").join("0.15").join("good_1.0.0.zip");
        assert!(installed.exists());
        assert!(!good.exists());
        assert_eq!(result.installed[0].file_path, installed);
        // Invalid archives stay where they were
        assert!(bad.exists());
    }

    #[test]
    fn test_add_mods_never_overwrites() {
        let dir = tempdir().unwrap();
        let downloads = dir.path().join("downloads");
        fs::create_dir(&downloads).unwrap();
        let settings = Settings::new(&dir.path().join("settings.json"), dir.path());
        let info = r#"{"name":"helmod","version":"0.6.0","factorio_version":"0.16"}"#;

        let first = downloads.join("helmod_0.6.0.zip");
        write_mod(&first, info);
        assert_eq!(add_mods(&[first.clone()], &settings, None).installed.len(), 1);
        let installed = dir.path().join("mods").join("0.16").join("helmod_0.6.0.zip");
        let original = fs::read(&installed).unwrap();

        // Same file name again, different content
        write_mod(&first, r#"{"name":"helmod","version":"0.6.0","factorio_version":"0.16","title":"Other"}"#);
        let result = add_mods(&[first.clone()], &settings, None);

        assert!(result.installed.is_empty());
        assert_eq!(result.skipped, vec!["helmod_0.6.0.zip".to_string()]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("already exists"));
        assert_eq!(fs::read(&installed).unwrap(), original);
        assert!(first.exists());
    }

    #[test]
    fn test_add_mods_empty_batch() {
        let dir = tempdir().unwrap();
        let settings = Settings::new(&dir.path().join("settings.json"), dir.path());
        let result = add_mods(&[], &settings, None);
        assert!(result.installed.is_empty());
        assert!(result.errors.is_empty());
    }
}
