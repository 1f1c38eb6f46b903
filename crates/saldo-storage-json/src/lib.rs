//! Filesystem-backed JSON persistence for journals.
//!
//! Saves are atomic (tmp file + rename) and the previous file version is
//! rotated to a `.bak` sibling first, so an interrupted write can never leave
//! a half-applied rollover behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use saldo_core::{storage::JournalStorage, CoreError};
use saldo_domain::Journal;

const JOURNAL_EXTENSION: &str = "json";
const BACKUP_EXTENSION: &str = "bak";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone)]
pub struct JsonJournalStorage {
    root: PathBuf,
}

impl JsonJournalStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn journal_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), JOURNAL_EXTENSION))
    }

    fn backup_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), BACKUP_EXTENSION))
    }
}

impl JournalStorage for JsonJournalStorage {
    fn save_journal(&self, name: &str, journal: &Journal) -> Result<(), CoreError> {
        let path = self.journal_path(name);
        if path.exists() {
            fs::copy(&path, self.backup_path(name))?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_journal(journal)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_journal(&self, name: &str) -> Result<Journal, CoreError> {
        let path = self.journal_path(name);
        if !path.exists() {
            return Err(CoreError::JournalNotFound(name.to_string()));
        }
        load_journal_from_path(&path)
    }

    fn list_journals(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(JOURNAL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_journal(&self, name: &str) -> Result<(), CoreError> {
        let path = self.journal_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Saves a journal to an arbitrary path on disk.
pub fn save_journal_to_path(journal: &Journal, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_journal(journal)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a journal from the provided filesystem path.
pub fn load_journal_from_path(path: &Path) -> Result<Journal, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "journal".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_journal(journal: &Journal) -> Result<String, CoreError> {
    serde_json::to_string_pretty(journal).map_err(|err| CoreError::Serde(err.to_string()))
}
