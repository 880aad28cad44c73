//! Deploy command - distribute a DAR, vet it, and update the registry.

use darship_core::{
    resolve_version, vetting_warnings, DarLocator, DeployConfig, DeployResult,
    DistributionCoordinator, ParticipantClient, RegistryStore, VettingCoordinator,
};

pub async fn run(version: Option<String>) -> DeployResult<()> {
    let config = DeployConfig::load()?;

    let version = resolve_version(version, &config.manifest_path())?;
    println!("Deploying {} v{}", config.project.name, version);

    let locator = DarLocator::new(config.dist_dir(), &config.project.name);
    println!("  DAR: {}", locator.dar_path(&version).display());
    let artifact = locator.locate(&version)?;
    println!("  Read {} bytes", artifact.bytes.len());

    let client = ParticipantClient::grpcurl()?;

    println!(
        "\nUploading to {} participants...",
        config.participants.len()
    );
    let report = DistributionCoordinator::new(client.clone())
        .distribute(&artifact, &config.project.name, &config.participants)
        .await?;
    for outcome in &report.outcomes {
        println!("  {}: upload successful", outcome.participant);
    }
    println!("  Package ID: {}", report.package_id);

    println!("\nVetting package on all participants...");
    let outcomes = VettingCoordinator::new(client)
        .vet_everywhere(&report.package_id, &config.participants)
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

    println!("\nUpdating package registry...");
    let store = RegistryStore::new(config.registry_path());
    store.record(&version, report.package_id.clone())?;
    println!(
        "  {}: {} -> {}",
        store.path().display(),
        version,
        report.package_id
    );

    let warnings = vetting_warnings(&outcomes);
    if warnings.is_empty() {
        println!("\nDeployment complete.");
    } else {
        println!(
            "\nDeployment complete with {} vetting warning(s).",
            warnings.len()
        );
        println!("Re-run vetting with: darship vet {}", report.package_id);
    }

    Ok(())
}
