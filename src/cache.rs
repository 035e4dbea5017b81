//! Durable lookup cache for resolved calorie values.
//!
//! The store is a JSON object mapping normalized ingredient phrases to an
//! energy value in kcal, or `null` for phrases the nutrient source had no
//! data for. The `null` marker is deliberate: it is distinguished from a
//! genuine zero-calorie value and keeps known-empty lookups from hitting
//! the network again on later runs.
//!
//! One run owns the store exclusively: load once, mutate in memory, write
//! the whole document back once at the end. There is no cross-process
//! locking, so concurrent runs against the same store can lose each
//! other's new entries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CalorieCache {
    #[serde(flatten)]
    entries: BTreeMap<String, Option<f64>>,
}

impl CalorieCache {
    /// Cache lookup. The outer `Option` is hit/miss; the inner value is the
    /// resolved energy or the "no data" marker.
    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        self.entries.get(key).copied()
    }

    /// First resolution wins: a key already present keeps its value for the
    /// rest of the process lifetime.
    pub fn record(&mut self, key: &str, value: Option<f64>) {
        self.entries.entry(key.to_string()).or_insert(value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Durable home of a [`CalorieCache`].
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, degrading to empty on a missing or unreadable store.
    pub fn load(&self) -> CalorieCache {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return CalorieCache::default(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(cache) => cache,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "calorie cache unreadable, starting empty"
                );
                CalorieCache::default()
            }
        }
    }

    /// Rewrite the whole store from the in-memory cache.
    pub fn save(&self, cache: &CalorieCache) -> Result<()> {
        let text = serde_json::to_string_pretty(cache).context("serialize calorie cache")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_no_data_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join("cache.json"));

        let mut cache = CalorieCache::default();
        cache.record("purpose flour", Some(364.0));
        cache.record("dragon scales", None);
        cache.record("plain water", Some(0.0));
        store.save(&cache).expect("save");

        let loaded = store.load();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.get("purpose flour"), Some(Some(364.0)));
        assert_eq!(loaded.get("dragon scales"), Some(None));
        assert_eq!(loaded.get("plain water"), Some(Some(0.0)));
        assert_eq!(loaded.get("missing key"), None);
    }

    #[test]
    fn load_defaults_on_missing_or_corrupt_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join("cache.json"));
        assert!(store.load().is_empty());

        fs::write(store.path(), b"{not-json").expect("write corrupt");
        assert!(store.load().is_empty());
    }

    #[test]
    fn first_resolution_wins() {
        let mut cache = CalorieCache::default();
        cache.record("egg", Some(70.0));
        cache.record("egg", Some(999.0));
        cache.record("egg", None);
        assert_eq!(cache.get("egg"), Some(Some(70.0)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join("nested").join("cache.json"));
        store.save(&CalorieCache::default()).expect("save");
        assert!(store.path().is_file());
    }
}
