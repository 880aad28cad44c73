//! grpcurl-backed admin transport.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use super::{AdminRpc, AdminTransport, TransportError, TransportResult};

/// Invokes participant admin RPCs by shelling out to `grpcurl`.
///
/// Each call is a plaintext gRPC request with the payload passed via `-d`.
/// A non-zero exit status is a failure, with stderr as the detail.
#[derive(Debug, Clone)]
pub struct GrpcurlTransport {
    binary: PathBuf,
}

impl GrpcurlTransport {
    /// Create the transport, verifying `grpcurl` is installed.
    pub fn new() -> TransportResult<Self> {
        let binary = which::which("grpcurl").map_err(|_| TransportError::MissingBinary)?;
        Ok(Self { binary })
    }
}

#[async_trait]
impl AdminTransport for GrpcurlTransport {
    async fn call(
        &self,
        address: &str,
        rpc: AdminRpc,
        request: Value,
    ) -> TransportResult<Option<Value>> {
        let payload = serde_json::to_string(&request)
            .map_err(|e| TransportError::Serialisation(e.to_string()))?;

        debug!(address, method = rpc.method_path(), "invoking admin RPC");

        let output = Command::new(&self.binary)
            .args(["-plaintext", "-d", payload.as_str(), address, rpc.method_path()])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransportError::CallFailed(stderr.trim().to_owned()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let body = stdout.trim();
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(body)
            .map(Some)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}
