//! Admin API transport.
//!
//! The coordinators only depend on [`AdminTransport`]: one call that takes a
//! participant address, an RPC method, and a JSON payload, and returns an
//! optional JSON response. The production implementation shells out to
//! `grpcurl`; tests use [`MockTransport`].

mod grpcurl;
mod mock;

pub use grpcurl::GrpcurlTransport;
pub use mock::{MockTransport, RecordedCall};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{Participant, UploadDarRequest, UploadDarResponse, VetDarRequest};

/// Result type alias using [`TransportError`].
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised by the admin transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport binary is not installed.
    #[error("grpcurl not found on PATH; install it to talk to participant admin APIs")]
    MissingBinary,

    /// The transport process could not be started.
    #[error("failed to invoke transport: {0}")]
    Spawn(#[from] std::io::Error),

    /// The remote call failed (non-zero exit status).
    #[error("{0}")]
    CallFailed(String),

    /// The response payload could not be parsed.
    #[error("invalid response payload: {0}")]
    InvalidResponse(String),

    /// A request payload could not be serialised.
    #[error("serialisation error: {0}")]
    Serialisation(String),
}

/// Admin RPCs this tool invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRpc {
    /// Upload a DAR to a participant.
    UploadDar,
    /// Vet an uploaded package on a participant.
    VetDar,
}

impl AdminRpc {
    /// Fully-qualified gRPC method path.
    #[must_use]
    pub const fn method_path(&self) -> &'static str {
        match self {
            Self::UploadDar => {
                "com.digitalasset.canton.admin.participant.v30.PackageService/UploadDar"
            }
            Self::VetDar => {
                "com.digitalasset.canton.admin.participant.v30.PackageService/VetDar"
            }
        }
    }
}

/// Blocking request/response call against a participant admin API.
///
/// No retries and no timeout beyond what the underlying transport enforces.
#[async_trait]
pub trait AdminTransport: Send + Sync {
    /// Invoke `rpc` at `address` with the given JSON request payload.
    ///
    /// Returns the response payload if the call produced one.
    async fn call(
        &self,
        address: &str,
        rpc: AdminRpc,
        request: Value,
    ) -> TransportResult<Option<Value>>;
}

/// Typed client over an [`AdminTransport`].
#[derive(Clone)]
pub struct ParticipantClient {
    transport: Arc<dyn AdminTransport>,
}

impl ParticipantClient {
    /// Create a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AdminTransport>) -> Self {
        Self { transport }
    }

    /// Create a client over the production grpcurl transport.
    pub fn grpcurl() -> TransportResult<Self> {
        Ok(Self::new(Arc::new(GrpcurlTransport::new()?)))
    }

    /// Upload a DAR to one participant.
    pub async fn upload_dar(
        &self,
        participant: &Participant,
        request: &UploadDarRequest,
    ) -> TransportResult<UploadDarResponse> {
        let payload = serde_json::to_value(request)
            .map_err(|e| TransportError::Serialisation(e.to_string()))?;

        let response = self
            .transport
            .call(&participant.address, AdminRpc::UploadDar, payload)
            .await?;

        match response {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| TransportError::InvalidResponse(e.to_string())),
            None => Ok(UploadDarResponse { dar_ids: Vec::new() }),
        }
    }

    /// Vet a package on one participant.
    ///
    /// Success is signalled by the call completing; no structured response
    /// payload is required.
    pub async fn vet_dar(
        &self,
        participant: &Participant,
        request: &VetDarRequest,
    ) -> TransportResult<()> {
        let payload = serde_json::to_value(request)
            .map_err(|e| TransportError::Serialisation(e.to_string()))?;

        self.transport
            .call(&participant.address, AdminRpc::VetDar, payload)
            .await?;
        Ok(())
    }
}
