//! Error types for darship-core.

use std::path::PathBuf;

use crate::transport::TransportError;

/// Result type alias using [`DeployError`].
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors that abort a deployment run.
///
/// Vetting failures are deliberately absent: a participant that refuses to
/// vet is recorded as a [`crate::types::VetOutcome`] and reported as a
/// warning, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Configuration error, including an unresolvable version.
    #[error("configuration error: {0}")]
    Config(String),

    /// No DAR exists for the requested version.
    #[error("DAR not found: {} (has `daml build` been run for version {version}?)", .path.display())]
    ArtifactNotFound {
        /// Path the DAR was expected at.
        path: PathBuf,
        /// Version the DAR was requested for.
        version: String,
    },

    /// An upload failed or returned an unusable response.
    ///
    /// Any distribution failure is fatal: a DAR that is not present on every
    /// participant must not be recorded in the registry.
    #[error("distribution to {participant} failed: {detail}")]
    Distribution {
        /// Name of the participant the upload was addressed to.
        participant: String,
        /// Failure detail from the transport or response parsing.
        detail: String,
    },

    /// The package registry could not be read, parsed, or written.
    #[error("registry error at {}: {detail}", .path.display())]
    Registry {
        /// Registry file path.
        path: PathBuf,
        /// Failure detail.
        detail: String,
    },

    /// Transport construction error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a distribution error for a named participant.
    #[must_use]
    pub fn distribution(participant: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Distribution {
            participant: participant.into(),
            detail: detail.into(),
        }
    }

    /// Create a registry error for the given path.
    #[must_use]
    pub fn registry(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Registry {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
