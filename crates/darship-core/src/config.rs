//! Configuration for darship.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::error::{DeployError, DeployResult};
use crate::types::{Participant, ParticipantRole};

/// Top-level configuration for a deployment run.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    /// Daml project configuration.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Package registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Participants the DAR is distributed to and vetted on.
    ///
    /// Exactly one must be authoritative; at least one must be secondary.
    #[serde(default = "default_participants")]
    pub participants: Vec<Participant>,
}

impl DeployConfig {
    /// Load configuration from the default sources.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. `darship.toml` in the current directory (if present)
    /// 3. Environment variables with `DARSHIP_` prefix
    pub fn load() -> DeployResult<Self> {
        let config: Self = Figment::new()
            .merge(Toml::file("darship.toml"))
            .merge(Env::prefixed("DARSHIP_").split("__"))
            .extract()
            .map_err(|e| DeployError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> DeployResult<Self> {
        let config: Self = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("DARSHIP_").split("__"))
            .extract()
            .map_err(|e| DeployError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the participant set is usable for a run.
    pub fn validate(&self) -> DeployResult<()> {
        let authoritative = self
            .participants
            .iter()
            .filter(|p| p.is_authoritative())
            .count();
        if authoritative != 1 {
            return Err(DeployError::config(format!(
                "expected exactly one authoritative participant, found {authoritative}"
            )));
        }
        if self.participants.len() < 2 {
            return Err(DeployError::config(
                "at least one secondary participant is required",
            ));
        }
        Ok(())
    }

    /// The participant whose upload response supplies the canonical id.
    ///
    /// `None` only on a configuration that failed [`validate`](Self::validate).
    #[must_use]
    pub fn authoritative(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_authoritative())
    }

    /// Secondary participants in configuration order.
    pub fn secondaries(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| !p.is_authoritative())
    }

    /// Directory of the Daml project (contains `daml.yaml`).
    #[must_use]
    pub fn daml_project_dir(&self) -> PathBuf {
        self.project.root.join(&self.project.daml_dir)
    }

    /// Path to the project manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.daml_project_dir().join("daml.yaml")
    }

    /// Directory the Daml toolchain writes built DARs into.
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.daml_project_dir().join(".daml").join("dist")
    }

    /// Path of the package registry file.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.project.root.join(&self.registry.path)
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            registry: RegistryConfig::default(),
            participants: default_participants(),
        }
    }
}

/// Daml project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Package name, used to derive DAR file names.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Project root all other paths are resolved against.
    #[serde(default = "default_project_root")]
    pub root: PathBuf,

    /// Daml project directory, relative to the root.
    #[serde(default = "default_daml_dir")]
    pub daml_dir: PathBuf,
}

fn default_project_name() -> String {
    "minimal-token".to_owned()
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_daml_dir() -> PathBuf {
    PathBuf::from("daml/minimal-token")
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            root: default_project_root(),
            daml_dir: default_daml_dir(),
        }
    }
}

/// Package registry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Registry file path, relative to the project root.
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("config/package-registry.json")
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

/// The LocalNet participant layout the original deployment targets.
fn default_participants() -> Vec<Participant> {
    vec![
        Participant::new(
            "app-provider",
            "localhost:3902",
            ParticipantRole::Authoritative,
        ),
        Participant::new("app-user", "localhost:2902", ParticipantRole::Secondary),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DeployConfig::default();
        config.validate().unwrap();

        assert_eq!(config.project.name, "minimal-token");
        let authoritative = config.authoritative().unwrap();
        assert_eq!(authoritative.name, "app-provider");
        assert_eq!(authoritative.address, "localhost:3902");
        let secondaries: Vec<_> = config.secondaries().collect();
        assert_eq!(secondaries.len(), 1);
        assert_eq!(secondaries[0].name, "app-user");
        assert_eq!(
            config.registry_path(),
            PathBuf::from("./config/package-registry.json")
        );
    }

    #[test]
    fn config_from_toml() {
        let toml = r#"
            [project]
            name = "orders"
            root = "/srv/orders"
            daml_dir = "daml/orders"

            [registry]
            path = "registry/packages.json"

            [[participants]]
            name = "primary"
            address = "localhost:4902"
            role = "authoritative"

            [[participants]]
            name = "replica-a"
            address = "localhost:5902"
            role = "secondary"

            [[participants]]
            name = "replica-b"
            address = "localhost:6902"
            role = "secondary"
        "#;

        let config: DeployConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.project.name, "orders");
        assert_eq!(config.authoritative().unwrap().address, "localhost:4902");
        assert_eq!(config.secondaries().count(), 2);
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("/srv/orders/daml/orders/daml.yaml")
        );
        assert_eq!(
            config.registry_path(),
            PathBuf::from("/srv/orders/registry/packages.json")
        );
    }

    #[test]
    fn two_authoritative_participants_rejected() {
        let config = DeployConfig {
            participants: vec![
                Participant::new("a", "localhost:1", ParticipantRole::Authoritative),
                Participant::new("b", "localhost:2", ParticipantRole::Authoritative),
            ],
            ..DeployConfig::default()
        };

        assert!(matches!(config.validate(), Err(DeployError::Config(_))));
    }

    #[test]
    fn missing_secondary_rejected() {
        let config = DeployConfig {
            participants: vec![Participant::new(
                "a",
                "localhost:1",
                ParticipantRole::Authoritative,
            )],
            ..DeployConfig::default()
        };

        assert!(matches!(config.validate(), Err(DeployError::Config(_))));
    }
}
