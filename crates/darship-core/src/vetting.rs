//! Package vetting across participants.

use tracing::{debug, warn};

use crate::transport::ParticipantClient;
use crate::types::{PackageId, Participant, VetDarRequest, VetOutcome};

/// Vets a package on every participant, authoritative and secondary alike.
///
/// Per-participant failure is non-fatal: the outcome is recorded as a
/// warning and the remaining participants are still attempted. Whether a
/// partial vetting is acceptable is the caller's decision; the coordinator
/// itself never fails.
#[derive(Clone)]
pub struct VettingCoordinator {
    client: ParticipantClient,
}

impl VettingCoordinator {
    /// Create a coordinator over the given client.
    #[must_use]
    pub fn new(client: ParticipantClient) -> Self {
        Self { client }
    }

    /// Vet `package_id` on all `participants`, in order.
    ///
    /// Returns one outcome per participant.
    pub async fn vet_everywhere(
        &self,
        package_id: &PackageId,
        participants: &[Participant],
    ) -> Vec<VetOutcome> {
        let request = VetDarRequest {
            main_package_id: package_id.clone(),
            synchronize: true,
        };

        let mut outcomes = Vec::with_capacity(participants.len());
        for participant in participants {
            debug!(
                participant = %participant.name,
                address = %participant.address,
                package_id = %package_id,
                "vetting package"
            );
            match self.client.vet_dar(participant, &request).await {
                Ok(()) => outcomes.push(VetOutcome::ok(&participant.name)),
                Err(e) => {
                    warn!(
                        participant = %participant.name,
                        error = %e,
                        "vetting failed; continuing with remaining participants"
                    );
                    outcomes.push(VetOutcome::warned(&participant.name, e.to_string()));
                }
            }
        }
        outcomes
    }
}

/// Outcomes that ended in a warning.
#[must_use]
pub fn vetting_warnings(outcomes: &[VetOutcome]) -> Vec<&VetOutcome> {
    outcomes.iter().filter(|o| !o.success).collect()
}
