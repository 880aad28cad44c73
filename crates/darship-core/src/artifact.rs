//! Locating built DARs on disk.

use std::path::PathBuf;

use crate::error::{DeployError, DeployResult};
use crate::types::DarArtifact;

/// Maps a version to a DAR file under the Daml dist directory.
#[derive(Debug, Clone)]
pub struct DarLocator {
    dist_dir: PathBuf,
    package_name: String,
}

impl DarLocator {
    /// Create a locator for the given dist directory and package name.
    #[must_use]
    pub fn new(dist_dir: impl Into<PathBuf>, package_name: impl Into<String>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            package_name: package_name.into(),
        }
    }

    /// The path a DAR for `version` would be built at.
    ///
    /// Pure function of the version; the Daml toolchain writes
    /// `<name>-<version>.dar` into the dist directory.
    #[must_use]
    pub fn dar_path(&self, version: &str) -> PathBuf {
        self.dist_dir
            .join(format!("{}-{version}.dar", self.package_name))
    }

    /// Load the DAR for `version`.
    ///
    /// Fails with [`DeployError::ArtifactNotFound`] if nothing has been built
    /// for that version. No side effects.
    pub fn locate(&self, version: &str) -> DeployResult<DarArtifact> {
        let path = self.dar_path(version);
        if !path.exists() {
            return Err(DeployError::ArtifactNotFound {
                path,
                version: version.to_owned(),
            });
        }

        let bytes = std::fs::read(&path)?;
        Ok(DarArtifact {
            version: version.to_owned(),
            bytes,
        })
    }
}
