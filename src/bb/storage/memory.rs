// Copyright (c) 2026 Billbook. All Rights Reserved.

use std::collections::HashMap;
use std::sync::Mutex;

use bb::storage::Storage;

/// A process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb::storage;

    #[test]
    fn set_then_get_then_remove() {
        let store = MemoryStorage::new();
        assert!(store.get(storage::TOKEN).is_none());
        store.set(storage::TOKEN, "abc");
        assert_eq!(store.get(storage::TOKEN), Some("abc".to_string()));
        store.remove(storage::TOKEN);
        assert!(store.get(storage::TOKEN).is_none());
    }

    #[test]
    fn clear_all_only_touches_session_keys() {
        let store = MemoryStorage::new();
        for key in storage::SESSION_KEYS.iter() {
            store.set(key, "x");
        }
        store.set("lastVisitedPage", "/bills");
        store.clear_all();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("lastVisitedPage"), Some("/bills".to_string()));

        // Clearing an already cleared store is a no-op.
        store.clear_all();
        assert_eq!(store.len(), 1);
    }
}
