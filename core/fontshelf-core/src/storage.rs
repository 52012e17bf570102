//! Small key-value persistence for favorites, comparison and locale

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde_json::Value;

use crate::catalog::Catalog;

pub const FAVORITES_KEY: &str = "font-catalog-favorites";
pub const COMPARE_KEY: &str = "font-catalog-compare";
pub const LANGUAGE_KEY: &str = "app-language";

/// String values under string keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory store poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store. A missing file starts empty; so does one that cannot
    /// be read or parsed, after a copy is kept next to it as `.json.bak`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(err) => {
                warn!("ignoring state file: {err:#}");
                let backup = path.with_extension("json.bak");
                if let Err(err) = fs::copy(&path, &backup) {
                    warn!("could not back up {}: {err}", path.display());
                }
                BTreeMap::new()
            }
        };
        debug!("opened state file {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file =
            fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
        serde_json::to_writer_pretty(&mut file, values)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("state store poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("state store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&raw).with_context(|| format!("parsing state file {}", path.display()))
}

/// Read a stored id list, keeping only ids the catalog knows.
///
/// Missing keys, malformed JSON and read errors all yield an empty list.
pub fn load_ids(store: &dyn KeyValueStore, key: &str, catalog: &Catalog) -> Vec<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("could not read {key}: {err:#}");
            return Vec::new();
        }
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("ignoring {key}: stored value is not a list");
            return Vec::new();
        }
        Err(err) => {
            warn!("ignoring {key}: {err}");
            return Vec::new();
        }
    };

    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if let Value::String(id) = item {
            if catalog.contains(&id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Write an id list; failures are logged and otherwise ignored.
pub fn persist_ids(store: &dyn KeyValueStore, key: &str, ids: &[String]) {
    let encoded = match serde_json::to_string(ids) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("could not encode {key}: {err}");
            return;
        }
    };
    if let Err(err) = store.set(key, &encoded) {
        warn!("could not persist {key}: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every call fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("disk on fire"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    #[test]
    fn malformed_values_load_as_empty() {
        let catalog = Catalog::builtin();
        for raw in ["not json", "{\"a\":1}", "42", "null"] {
            let store = MemoryStore::new().with_value(FAVORITES_KEY, raw);
            assert!(load_ids(&store, FAVORITES_KEY, &catalog).is_empty(), "{raw}");
        }
        assert!(load_ids(&BrokenStore, FAVORITES_KEY, &catalog).is_empty());
    }

    #[test]
    fn unknown_and_non_string_ids_are_dropped_in_order() {
        let catalog = Catalog::builtin();
        let store = MemoryStore::new().with_value(
            COMPARE_KEY,
            r#"["gh-hubot", 7, "ghost-id", "gh-mona", "gh-hubot"]"#,
        );
        assert_eq!(
            load_ids(&store, COMPARE_KEY, &catalog),
            vec!["gh-hubot", "gh-mona"]
        );
    }

    #[test]
    fn persist_failures_are_swallowed() {
        persist_ids(&BrokenStore, FAVORITES_KEY, &["gh-mona".to_string()]);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.set(LANGUAGE_KEY, "en").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_state_file_starts_empty_and_is_kept_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{oops").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
        assert_eq!(
            fs::read_to_string(path.with_extension("json.bak")).unwrap(),
            "{oops"
        );

        store.set(LANGUAGE_KEY, "en").unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn non_object_state_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2]").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(LANGUAGE_KEY).unwrap(), None);
    }
}
