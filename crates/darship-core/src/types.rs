//! Core types for darship-core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an uploaded DAR by a participant.
///
/// The id returned by the authoritative participant is the canonical one;
/// every vetting call and registry entry refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Create a new package id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Role of a participant within a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// The participant whose upload response supplies the canonical
    /// package id. Exactly one per configuration.
    Authoritative,
    /// Any other participant the DAR is distributed to.
    Secondary,
}

impl ParticipantRole {
    /// Get the role name as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authoritative => "authoritative",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A Canton participant the tool talks to.
///
/// Configuration data, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Human-readable participant name (e.g. "app-provider").
    pub name: String,
    /// Admin API address as host:port.
    pub address: String,
    /// Role in the distribution protocol.
    pub role: ParticipantRole,
}

impl Participant {
    /// Create a new participant record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        role: ParticipantRole,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            role,
        }
    }

    /// Whether this participant supplies the canonical package id.
    #[must_use]
    pub const fn is_authoritative(&self) -> bool {
        matches!(self.role, ParticipantRole::Authoritative)
    }
}

/// A versioned DAR located on disk, ready for distribution.
#[derive(Debug, Clone)]
pub struct DarArtifact {
    /// Version string the DAR was built for.
    pub version: String,
    /// Raw DAR bytes.
    pub bytes: Vec<u8>,
}

/// One DAR payload within an upload request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarPayload {
    /// Base64-encoded DAR bytes.
    pub bytes: String,
    /// Human-readable description, including the version.
    pub description: String,
}

/// Request body for the `UploadDar` admin RPC.
///
/// Field names are the proto field names the admin API accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDarRequest {
    /// DARs to upload; this tool always sends exactly one.
    pub dars: Vec<DarPayload>,
    /// Ask the participant to vet all packages in the DAR.
    pub vet_all_packages: bool,
    /// Block until vetting has completed on the participant.
    pub synchronize_vetting: bool,
}

/// Response body for the `UploadDar` admin RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDarResponse {
    /// Ids assigned to the uploaded DARs; the first is the canonical one.
    #[serde(rename = "darIds", default)]
    pub dar_ids: Vec<PackageId>,
}

impl UploadDarResponse {
    /// The canonical package id, if the participant returned one.
    #[must_use]
    pub fn main_package_id(&self) -> Option<&PackageId> {
        self.dar_ids.first()
    }
}

/// Request body for the `VetDar` admin RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VetDarRequest {
    /// Package id to vet.
    pub main_package_id: PackageId,
    /// Block until vetting has completed on the participant.
    pub synchronize: bool,
}

/// Result of one upload attempt against one participant.
///
/// Produced once per participant per run; observability data only, never
/// persisted.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Participant name.
    pub participant: String,
    /// Whether the upload succeeded.
    pub success: bool,
    /// Package id returned by the participant, if any.
    pub package_id: Option<PackageId>,
    /// Failure detail when `success` is false.
    pub detail: Option<String>,
}

/// Result of one vetting attempt against one participant.
#[derive(Debug, Clone)]
pub struct VetOutcome {
    /// Participant name.
    pub participant: String,
    /// Whether the vetting call succeeded.
    pub success: bool,
    /// Warning detail when `success` is false.
    pub warning: Option<String>,
}

impl VetOutcome {
    /// Record a successful vetting.
    #[must_use]
    pub fn ok(participant: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            success: true,
            warning: None,
        }
    }

    /// Record a failed vetting with the given warning detail.
    #[must_use]
    pub fn warned(participant: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            success: false,
            warning: Some(warning.into()),
        }
    }
}
