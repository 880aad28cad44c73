//! Persisted package registry.
//!
//! The registry is a machine-written JSON file mapping versions to package
//! ids, consumed by other services to pick the package id for a version.
//! It is read, merged, and rewritten as a whole on every run; entries for
//! unrelated versions are preserved.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeployError, DeployResult};
use crate::types::PackageId;

/// Version→package-id mapping with a current-version pointer.
///
/// `current_version`/`current_package_id` reflect the most recent completed
/// run, regardless of version ordering: deploying an older version after a
/// newer one makes the older version current (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRegistry {
    /// Version recorded by the most recent run.
    #[serde(default)]
    pub current_version: Option<String>,

    /// Package id recorded by the most recent run.
    #[serde(default)]
    pub current_package_id: Option<PackageId>,

    /// All recorded versions, ordered version-descending.
    #[serde(default)]
    pub entries: IndexMap<String, PackageId>,
}

impl PackageRegistry {
    /// Merge a `(version, package_id)` pair into the registry.
    ///
    /// Overwrites any existing entry for the same version, re-sorts entries
    /// by version descending (plain string comparison), and marks the pair
    /// as current.
    pub fn record(&mut self, version: &str, package_id: PackageId) {
        self.entries.insert(version.to_owned(), package_id.clone());
        self.entries.sort_by(|a, _, b, _| b.cmp(a));
        self.current_version = Some(version.to_owned());
        self.current_package_id = Some(package_id);
    }

    /// Look up the package id recorded for a version.
    #[must_use]
    pub fn get(&self, version: &str) -> Option<&PackageId> {
        self.entries.get(version)
    }
}

/// Loads and stores the registry file.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// Create a store for the given registry file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The registry file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry, or an empty one if the file does not exist yet.
    ///
    /// The parser accepts anything this store previously wrote; arbitrary
    /// hand-edited content is not supported.
    pub fn load(&self) -> DeployResult<PackageRegistry> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no registry yet, starting empty");
            return Ok(PackageRegistry::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| DeployError::registry(&self.path, e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| DeployError::registry(&self.path, e.to_string()))
    }

    /// Write the registry back, creating parent directories as needed.
    pub fn save(&self, registry: &PackageRegistry) -> DeployResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DeployError::registry(&self.path, e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(registry)
            .map_err(|e| DeployError::registry(&self.path, e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| DeployError::registry(&self.path, e.to_string()))?;

        debug!(path = %self.path.display(), "registry written");
        Ok(())
    }

    /// Load, merge one `(version, package_id)` pair, and write back.
    ///
    /// Returns the resulting registry. This is the only durable side effect
    /// of a deployment run; a failure here does not undo the distribution or
    /// vetting already performed, and the run must be repeated (or the
    /// registry updated by hand) to record the mapping.
    pub fn record(&self, version: &str, package_id: PackageId) -> DeployResult<PackageRegistry> {
        let mut registry = self.load()?;
        registry.record(version, package_id);
        self.save(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> RegistryStore {
        RegistryStore::new(dir.path().join("config").join("package-registry.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = store_in(&dir).load().unwrap();
        assert_eq!(registry, PackageRegistry::default());
    }

    #[test]
    fn record_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.record("1.0.0", PackageId::new("abc123")).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn round_trip_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.record("1.0.0", PackageId::new("abc123")).unwrap();
        store.record("0.9.0", PackageId::new("old999")).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.get("1.0.0"), Some(&PackageId::new("abc123")));
        assert_eq!(reloaded.get("0.9.0"), Some(&PackageId::new("old999")));

        // Writing what was just read must not change the file.
        store.save(&reloaded).unwrap();
        assert_eq!(store.load().unwrap(), reloaded);
    }

    #[test]
    fn upsert_overwrites_only_the_given_version() {
        let mut registry = PackageRegistry::default();
        registry.record("1.0.0", PackageId::new("abc123"));
        registry.record("1.1.0", PackageId::new("def456"));
        registry.record("1.0.0", PackageId::new("newer"));

        assert_eq!(registry.get("1.0.0"), Some(&PackageId::new("newer")));
        assert_eq!(registry.get("1.1.0"), Some(&PackageId::new("def456")));
        assert_eq!(registry.entries.len(), 2);
    }

    #[test]
    fn entries_sorted_version_descending() {
        let mut registry = PackageRegistry::default();
        registry.record("0.9.0", PackageId::new("old999"));
        registry.record("1.0.0", PackageId::new("abc123"));
        registry.record("0.10.0", PackageId::new("mid555"));

        let versions: Vec<_> = registry.entries.keys().cloned().collect();
        // Plain string ordering, matching what consumers expect.
        assert_eq!(versions, ["1.0.0", "0.9.0", "0.10.0"]);
    }

    #[test]
    fn current_pointer_is_last_write_not_highest_version() {
        let mut registry = PackageRegistry::default();
        registry.record("1.0.0", PackageId::new("abc123"));
        registry.record("0.9.0", PackageId::new("old999"));

        assert_eq!(registry.current_version.as_deref(), Some("0.9.0"));
        assert_eq!(
            registry.current_package_id,
            Some(PackageId::new("old999"))
        );
        // The newer version's entry is untouched.
        assert_eq!(registry.get("1.0.0"), Some(&PackageId::new("abc123")));
    }

    #[test]
    fn registry_file_shape_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.record("1.0.0", PackageId::new("abc123")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["currentVersion"], "1.0.0");
        assert_eq!(raw["currentPackageId"], "abc123");
        assert_eq!(raw["entries"]["1.0.0"], "abc123");
    }

    #[test]
    fn corrupt_registry_is_a_registry_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package-registry.json");
        std::fs::write(&path, "not json").unwrap();

        let result = RegistryStore::new(&path).load();
        assert!(matches!(result, Err(DeployError::Registry { .. })));
    }
}
