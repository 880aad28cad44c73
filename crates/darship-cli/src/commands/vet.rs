//! Vet command - vet an already-uploaded package on every participant.

use darship_core::{
    vetting_warnings, DeployConfig, DeployResult, PackageId, ParticipantClient, VettingCoordinator,
};

pub async fn run(package_id: &str) -> DeployResult<()> {
    let config = DeployConfig::load()?;
    let client = ParticipantClient::grpcurl()?;

    println!("Vetting package {package_id}");

    let outcomes = VettingCoordinator::new(client)
        .vet_everywhere(&PackageId::new(package_id), &config.participants)
        .await;
    for outcome in &outcomes {
        if outcome.success {
            println!("  {}: vetting successful", outcome.participant);
        } else {
            println!(
                "  {}: vetting warning: {}",
                outcome.participant,
                outcome.warning.as_deref().unwrap_or("unknown failure")
            );
        }
    }

    let warnings = vetting_warnings(&outcomes);
    if warnings.is_empty() {
        println!("\nPackage vetted on all participants.");
    } else {
        println!(
            "\nVetting completed with {} warning(s); see above.",
            warnings.len()
        );
    }

    Ok(())
}
