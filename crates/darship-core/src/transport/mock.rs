//! Scripted in-memory transport for tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{AdminRpc, AdminTransport, TransportError, TransportResult};

/// One call observed by a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Address the call was sent to.
    pub address: String,
    /// RPC method invoked.
    pub rpc: AdminRpc,
    /// Request payload.
    pub request: Value,
}

/// Admin transport that records calls and returns scripted results.
///
/// Uploads answer with a fixed `darIds` list; individual addresses can be
/// scripted to fail uploads or vetting calls.
#[derive(Debug, Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    dar_ids: Vec<String>,
    fail_uploads: HashSet<String>,
    fail_vets: HashSet<String>,
}

impl MockTransport {
    /// Create a transport that answers uploads with the given dar ids.
    #[must_use]
    pub fn new(dar_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            dar_ids: dar_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Script upload failure for the given address.
    #[must_use]
    pub fn fail_upload_at(mut self, address: impl Into<String>) -> Self {
        self.fail_uploads.insert(address.into());
        self
    }

    /// Script vetting failure for the given address.
    #[must_use]
    pub fn fail_vet_at(mut self, address: impl Into<String>) -> Self {
        self.fail_vets.insert(address.into());
        self
    }

    /// All calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Calls observed for one RPC method, in order.
    #[must_use]
    pub fn calls_for(&self, rpc: AdminRpc) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.rpc == rpc)
            .collect()
    }
}

#[async_trait]
impl AdminTransport for MockTransport {
    async fn call(
        &self,
        address: &str,
        rpc: AdminRpc,
        request: Value,
    ) -> TransportResult<Option<Value>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                address: address.to_owned(),
                rpc,
                request,
            });
        }

        match rpc {
            AdminRpc::UploadDar => {
                if self.fail_uploads.contains(address) {
                    return Err(TransportError::CallFailed(format!(
                        "upload refused by {address}"
                    )));
                }
                Ok(Some(json!({ "darIds": self.dar_ids })))
            }
            AdminRpc::VetDar => {
                if self.fail_vets.contains(address) {
                    return Err(TransportError::CallFailed(format!(
                        "vetting refused by {address}"
                    )));
                }
                Ok(None)
            }
        }
    }
}
