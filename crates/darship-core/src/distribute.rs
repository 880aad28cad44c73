//! DAR distribution across participants.

use base64::Engine;
use tracing::{debug, info};

use crate::error::{DeployError, DeployResult};
use crate::transport::ParticipantClient;
use crate::types::{
    DarArtifact, DarPayload, PackageId, Participant, UploadDarRequest, UploadOutcome,
};

/// Result of a completed distribution pass.
#[derive(Debug, Clone)]
pub struct DistributionReport {
    /// Canonical package id from the authoritative participant.
    pub package_id: PackageId,
    /// Per-participant upload log.
    pub outcomes: Vec<UploadOutcome>,
}

/// Uploads a DAR to every participant.
///
/// The authoritative participant is always uploaded to first; its response
/// supplies the canonical package id. Secondaries follow in configuration
/// order. Any failure aborts the run: a DAR that is not present on every
/// participant must not be recorded as available.
#[derive(Clone)]
pub struct DistributionCoordinator {
    client: ParticipantClient,
}

impl DistributionCoordinator {
    /// Create a coordinator over the given client.
    #[must_use]
    pub fn new(client: ParticipantClient) -> Self {
        Self { client }
    }

    /// Build the upload request sent to every participant.
    ///
    /// The DAR bytes are base64-encoded for transport; the description
    /// carries the package name and version for operators inspecting the
    /// participant's package store.
    #[must_use]
    pub fn build_request(artifact: &DarArtifact, package_name: &str) -> UploadDarRequest {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&artifact.bytes);
        UploadDarRequest {
            dars: vec![DarPayload {
                bytes: encoded,
                description: format!("{package_name} v{}", artifact.version),
            }],
            vet_all_packages: true,
            synchronize_vetting: true,
        }
    }

    /// Distribute `artifact` to all `participants`.
    ///
    /// Uploading the same bytes twice is safe; the participant treats a
    /// repeated upload as a no-op.
    pub async fn distribute(
        &self,
        artifact: &DarArtifact,
        package_name: &str,
        participants: &[Participant],
    ) -> DeployResult<DistributionReport> {
        let authoritative = participants
            .iter()
            .find(|p| p.is_authoritative())
            .ok_or_else(|| DeployError::config("no authoritative participant configured"))?;

        let request = Self::build_request(artifact, package_name);
        let mut outcomes = Vec::with_capacity(participants.len());

        debug!(
            participant = %authoritative.name,
            address = %authoritative.address,
            "uploading to authoritative participant"
        );
        let response = self
            .client
            .upload_dar(authoritative, &request)
            .await
            .map_err(|e| DeployError::distribution(&authoritative.name, e.to_string()))?;

        let package_id = response.main_package_id().cloned().ok_or_else(|| {
            DeployError::distribution(
                &authoritative.name,
                "upload succeeded but the response contained no package id",
            )
        })?;

        info!(
            participant = %authoritative.name,
            package_id = %package_id,
            "authoritative upload complete"
        );
        outcomes.push(UploadOutcome {
            participant: authoritative.name.clone(),
            success: true,
            package_id: Some(package_id.clone()),
            detail: None,
        });

        for secondary in participants.iter().filter(|p| !p.is_authoritative()) {
            debug!(
                participant = %secondary.name,
                address = %secondary.address,
                "uploading to secondary participant"
            );
            self.client
                .upload_dar(secondary, &request)
                .await
                .map_err(|e| DeployError::distribution(&secondary.name, e.to_string()))?;

            outcomes.push(UploadOutcome {
                participant: secondary.name.clone(),
                success: true,
                package_id: None,
                detail: None,
            });
        }

        Ok(DistributionReport {
            package_id,
            outcomes,
        })
    }
}
