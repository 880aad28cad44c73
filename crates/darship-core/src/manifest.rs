//! Version resolution from the Daml project manifest.

use std::path::Path;

use serde::Deserialize;

use crate::error::{DeployError, DeployResult};

/// The subset of `daml.yaml` this tool reads.
#[derive(Debug, Deserialize)]
struct DamlManifest {
    #[serde(default)]
    version: Option<String>,
}

/// Determine the version to deploy.
///
/// An explicitly supplied version is used verbatim; otherwise the `version`
/// field is read from the manifest at `manifest_path`. A missing manifest or
/// an absent/empty version field is a configuration error.
pub fn resolve_version(
    explicit: Option<String>,
    manifest_path: &Path,
) -> DeployResult<String> {
    if let Some(version) = explicit {
        return Ok(version);
    }

    let content = std::fs::read_to_string(manifest_path).map_err(|e| {
        DeployError::config(format!(
            "cannot read manifest {}: {e}",
            manifest_path.display()
        ))
    })?;

    let manifest: DamlManifest = serde_yaml::from_str(&content).map_err(|e| {
        DeployError::config(format!(
            "cannot parse manifest {}: {e}",
            manifest_path.display()
        ))
    })?;

    match manifest.version {
        Some(version) if !version.is_empty() => Ok(version),
        _ => Err(DeployError::config(format!(
            "no version field in {}",
            manifest_path.display()
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_manifest(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("daml.yaml"), content).unwrap();
        dir
    }

    #[test]
    fn explicit_version_wins() {
        let path = Path::new("/nonexistent/daml.yaml");
        let version = resolve_version(Some("2.1.0".to_owned()), path).unwrap();
        assert_eq!(version, "2.1.0");
    }

    #[test]
    fn version_read_from_manifest() {
        let dir = write_manifest("sdk-version: 2.9.3\nname: minimal-token\nversion: 1.0.0\n");
        let version = resolve_version(None, &dir.path().join("daml.yaml")).unwrap();
        assert_eq!(version, "1.0.0");
    }

    #[test]
    fn missing_manifest_is_config_error() {
        let result = resolve_version(None, Path::new("/nonexistent/daml.yaml"));
        assert!(matches!(result, Err(DeployError::Config(_))));
    }

    #[test]
    fn missing_version_field_is_config_error() {
        let dir = write_manifest("name: minimal-token\n");
        let result = resolve_version(None, &dir.path().join("daml.yaml"));
        assert!(matches!(result, Err(DeployError::Config(_))));
    }

    #[test]
    fn empty_version_field_is_config_error() {
        let dir = write_manifest("name: minimal-token\nversion: \"\"\n");
        let result = resolve_version(None, &dir.path().join("daml.yaml"));
        assert!(matches!(result, Err(DeployError::Config(_))));
    }
}
