//! darship core
//!
//! Coordination logic for distributing a versioned DAR to a fixed set of
//! Canton participants, vetting it everywhere, and recording the resulting
//! version→package-id mapping in a local registry.
//!
//! # Protocol
//!
//! A run is strictly sequential; each stage starts only after the previous
//! one fully succeeded:
//!
//! ```text
//! resolve version ──▶ locate DAR ──▶ distribute ──▶ vet ──▶ update registry
//! ```
//!
//! Distribution uploads to the authoritative participant first — its
//! response supplies the canonical package id — then to every secondary.
//! Any upload failure is fatal: a DAR that is not present on every
//! participant is never recorded in the registry. Vetting failures, by
//! contrast, are per-participant warnings; the run completes and the
//! registry is still updated, and `darship vet <package-id>` re-runs the
//! vetting pass on its own.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use darship_core::{
//!     config::DeployConfig,
//!     distribute::DistributionCoordinator,
//!     transport::ParticipantClient,
//!     vetting::VettingCoordinator,
//! };
//!
//! let config = DeployConfig::load()?;
//! let client = ParticipantClient::grpcurl()?;
//!
//! let report = DistributionCoordinator::new(client.clone())
//!     .distribute(&artifact, &config.project.name, &config.participants)
//!     .await?;
//!
//! let outcomes = VettingCoordinator::new(client)
//!     .vet_everywhere(&report.package_id, &config.participants)
//!     .await;
//! ```

#![forbid(unsafe_code)]

pub mod artifact;
pub mod config;
pub mod distribute;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod transport;
pub mod types;
pub mod vetting;

// Re-export commonly used types at the crate root
pub use artifact::DarLocator;
pub use config::DeployConfig;
pub use distribute::{DistributionCoordinator, DistributionReport};
pub use error::{DeployError, DeployResult};
pub use manifest::resolve_version;
pub use registry::{PackageRegistry, RegistryStore};
pub use transport::{AdminRpc, AdminTransport, GrpcurlTransport, ParticipantClient};
pub use types::{
    DarArtifact, PackageId, Participant, ParticipantRole, UploadOutcome, VetOutcome,
};
pub use vetting::{vetting_warnings, VettingCoordinator};
