use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use inbox_core::error::PersistenceError;
use inbox_core::PreferenceStore;

/// Key/value preference store backed by a single JSON file, standing in
/// for a platform preference facility. Each call reads or rewrites the
/// whole file; the blobs involved are small.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.load_map().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| PersistenceError(err.to_string()))?;
            }
        }
        let raw =
            serde_json::to_string_pretty(&map).map_err(|err| PersistenceError(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| PersistenceError(err.to_string()))
    }
}
