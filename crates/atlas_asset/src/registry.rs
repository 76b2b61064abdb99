//! [`AssetRegistry`] — an id→path index over a filesystem tree with polling
//! hot-reload.

use std::collections::HashMap;
use std::path::Path;
use std::time::SystemTime;

use walkdir::WalkDir;

/// A single indexed asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// The file stem, used as the lookup key.
    pub id: String,
    /// The full path on disk.
    pub path: String,
    /// Increments each time [`AssetRegistry::poll_hot_reload`] detects a
    /// modification. Starts at `1`.
    pub version: u64,
}

type ReloadCallback = Box<dyn FnMut(&AssetEntry)>;

/// Indexes `.atlas`/`.atlasb` files under a directory root and detects
/// modifications via polling, since the core must remain portable across
/// filesystems without a watch API.
#[derive(Default)]
pub struct AssetRegistry {
    assets: HashMap<String, AssetEntry>,
    timestamps: HashMap<String, SystemTime>,
    on_reload: Option<ReloadCallback>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` recursively, registering every `.atlas`/`.atlasb` file
    /// with version `1` and recording its modification timestamp. Does
    /// nothing if `root` does not exist — the registry simply stays empty.
    pub fn scan(&mut self, root: impl AsRef<Path>) {
        let root = root.as_ref();
        if !root.exists() {
            return;
        }

        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_asset = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "atlas" || ext == "atlasb");
            if !is_asset {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let path_str = path.to_string_lossy().into_owned();
            let modified = std::fs::metadata(path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            self.assets.insert(
                stem.to_string(),
                AssetEntry {
                    id: stem.to_string(),
                    path: path_str.clone(),
                    version: 1,
                },
            );
            self.timestamps.insert(path_str, modified);
        }
    }

    /// Looks up an entry by its id (file stem).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AssetEntry> {
        self.assets.get(id)
    }

    /// Registers the callback invoked from [`Self::poll_hot_reload`] for
    /// every entry whose modification time changed. Replaces any previous
    /// callback.
    pub fn set_reload_callback(&mut self, callback: ReloadCallback) {
        self.on_reload = Some(callback);
    }

    /// For each registered entry, re-reads its modification time; if it
    /// differs from the stored time, updates the stored time, increments
    /// the entry's version, and invokes the reload callback.
    pub fn poll_hot_reload(&mut self) {
        for asset in self.assets.values_mut() {
            let Ok(metadata) = std::fs::metadata(&asset.path) else {
                continue;
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            let changed = self
                .timestamps
                .get(&asset.path)
                .is_none_or(|stored| *stored != modified);
            if changed {
                self.timestamps.insert(asset.path.clone(), modified);
                asset.version += 1;
                if let Some(callback) = &mut self.on_reload {
                    callback(asset);
                }
            }
        }
    }

    /// Returns the number of indexed assets.
    #[must_use]
    pub fn count(&self) -> usize {
        self.assets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("atlas_asset_registry_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn scan_of_missing_root_leaves_registry_empty() {
        let mut registry = AssetRegistry::new();
        registry.scan("/does/not/exist/anywhere");
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn scan_indexes_recognized_extensions_only() {
        let dir = temp_dir("scan");
        std::fs::write(dir.join("a.atlasb"), b"x").unwrap();
        std::fs::write(dir.join("b.atlas"), b"y").unwrap();
        std::fs::write(dir.join("c.txt"), b"z").unwrap();

        let mut registry = AssetRegistry::new();
        registry.scan(&dir);
        assert_eq!(registry.count(), 2);
        assert!(registry.get("a").is_some());
        assert!(registry.get("b").is_some());
        assert!(registry.get("c").is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn poll_hot_reload_bumps_version_on_change() {
        let dir = temp_dir("reload");
        let path = dir.join("prog.atlasb");
        std::fs::write(&path, b"v1").unwrap();

        let mut registry = AssetRegistry::new();
        registry.scan(&dir);
        assert_eq!(registry.get("prog").unwrap().version, 1);

        let reloaded: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let reloaded_clone = reloaded.clone();
        registry.set_reload_callback(Box::new(move |entry| {
            reloaded_clone.borrow_mut().push(entry.id.clone());
        }));

        // Force a distinguishable modification time.
        std::thread::sleep(std::time::Duration::from_millis(10));
        std::fs::write(&path, b"v2 - longer payload to force a new mtime").unwrap();

        registry.poll_hot_reload();
        assert_eq!(registry.get("prog").unwrap().version, 2);
        assert_eq!(*reloaded.borrow(), vec!["prog".to_string()]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
