// Copyright (c) 2026 Billbook. All Rights Reserved.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{self, Value};

use bb::storage::Storage;

/// A store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file. A missing, unreadable or corrupt
/// file reads as empty. Values written by other tools need not be strings:
/// scalars read back as their text, structured values as JSON, and
/// untouched entries are written back as they were.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)
    }

    fn update<F: FnOnce(&mut BTreeMap<String, Value>)>(&self, key: &str, f: F) {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries();
        f(&mut entries);
        if let Err(e) = self.write_entries(&entries) {
            warn!(path = ?self.path, key = key, error = %e, "bb:storage:file:write failed");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        self.read_entries().remove(key).and_then(as_text)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(key, |entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        });
    }

    fn remove(&self, key: &str) {
        self.update(key, |entries| {
            entries.remove(key);
        });
    }

    fn clear_all(&self) {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries();
        let before = entries.len();
        for key in super::SESSION_KEYS.iter() {
            entries.remove(*key);
        }
        if entries.len() == before {
            return;
        }
        if let Err(e) = self.write_entries(&entries) {
            warn!(path = ?self.path, error = %e, "bb:storage:file:clear failed");
        }
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => serde_json::to_string(&other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb::storage;
    use tempfile;

    #[test]
    fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("storage.json");

        FileStorage::new(&path).set(storage::TOKEN, "t-123");
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(storage::TOKEN), Some("t-123".to_string()));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStorage::new(&path);
        assert!(store.get(storage::TOKEN).is_none());

        store.set(storage::USER_NAME, "asha");
        assert_eq!(store.get(storage::USER_NAME), Some("asha".to_string()));
    }

    #[test]
    fn foreign_values_are_read_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(
            &path,
            r#"{"darkMode": true, "retries": 3, "layout": {"cols": 2}, "language": "en", "gone": null}"#,
        )
        .unwrap();

        let store = FileStorage::new(&path);
        assert_eq!(store.get(storage::DARK_MODE), Some("true".to_string()));
        assert_eq!(store.get("retries"), Some("3".to_string()));
        assert_eq!(store.get("layout"), Some(r#"{"cols":2}"#.to_string()));
        assert!(store.get("gone").is_none());

        store.set(storage::TOKEN, "t-9");

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(storage::TOKEN), Some("t-9".to_string()));
        assert_eq!(reopened.get("language"), Some("en".to_string()));
        assert_eq!(reopened.get("retries"), Some("3".to_string()));
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["darkMode"], Value::Bool(true));
    }

    #[test]
    fn clear_all_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().join("storage.json"));
        store.set(storage::TOKEN, "t");
        store.set(storage::DARK_MODE, "true");
        store.set("language", "en");

        store.clear_all();
        store.clear_all();

        assert!(store.get(storage::TOKEN).is_none());
        assert!(store.get(storage::DARK_MODE).is_none());
        assert_eq!(store.get("language"), Some("en".to_string()));
    }

    #[test]
    fn missing_directory_reads_as_empty() {
        let store = FileStorage::new("/nonexistent/billbook/storage.json");
        assert!(store.get(storage::TOKEN).is_none());
    }
}
