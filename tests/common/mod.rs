//! Shared utilities for integration testing: an in-memory cluster.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use kube::core::ErrorResponse;

use cluster_seeder::cluster::{ClusterOps, ResourceKind, ResourceState, SeedError, SeedResult};
use cluster_seeder::resources::SeedResource;

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub verb: &'static str,
    pub kind: ResourceKind,
    pub name: String,
}

/// In-memory [`ClusterOps`] implementation with scripted failures.
///
/// Failure codes are queued per kind and consumed FIFO, so a test can say
/// "the first two creates of a Pod fail with 503, then succeed".
#[derive(Default)]
pub struct MockCluster {
    calls: Mutex<Vec<Call>>,
    create_failures: Mutex<HashMap<ResourceKind, Vec<u16>>>,
    delete_failures: Mutex<HashMap<ResourceKind, Vec<u16>>>,
    states: Mutex<HashMap<(ResourceKind, String), ResourceState>>,
    state_lookups_fail: Mutex<bool>,
}

#[allow(dead_code)]
impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue HTTP error codes for subsequent creates of `kind`.
    pub fn fail_create(&self, kind: ResourceKind, codes: &[u16]) {
        self.create_failures
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .extend_from_slice(codes);
    }

    /// Queue HTTP error codes for subsequent deletes of `kind`.
    pub fn fail_delete(&self, kind: ResourceKind, codes: &[u16]) {
        self.delete_failures
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .extend_from_slice(codes);
    }

    /// Set the state reported for a resource.
    pub fn set_state(&self, kind: ResourceKind, name: &str, state: ResourceState) {
        self.states
            .lock()
            .unwrap()
            .insert((kind, name.to_string()), state);
    }

    /// Make every state lookup fail with a 503 (unreachable cluster).
    pub fn fail_state_lookups(&self) {
        *self.state_lookups_fail.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_verb(&self, verb: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.verb == verb)
            .collect()
    }

    fn record(&self, verb: &'static str, kind: ResourceKind, name: &str) {
        self.calls.lock().unwrap().push(Call {
            verb,
            kind,
            name: name.to_string(),
        });
    }

    fn pop_failure(
        table: &Mutex<HashMap<ResourceKind, Vec<u16>>>,
        kind: ResourceKind,
        name: &str,
    ) -> Option<SeedError> {
        let mut table = table.lock().unwrap();
        let queue = table.get_mut(&kind)?;
        if queue.is_empty() {
            return None;
        }
        let code = queue.remove(0);
        Some(api_error(kind, name, code))
    }
}

/// Build a [`SeedError::Api`] carrying a synthetic API server response.
pub fn api_error(kind: ResourceKind, name: &str, code: u16) -> SeedError {
    let reason = match code {
        404 => "NotFound",
        409 => "AlreadyExists",
        429 => "TooManyRequests",
        503 => "ServiceUnavailable",
        _ => "InternalError",
    };
    SeedError::Api {
        kind,
        name: name.to_string(),
        source: kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} {}", reason, name),
            reason: reason.to_string(),
            code,
        }),
    }
}

#[async_trait]
impl ClusterOps for MockCluster {
    async fn create(&self, resource: &SeedResource) -> SeedResult<()> {
        let kind = resource.kind();
        let name = resource.name();
        self.record("create", kind, name);

        if let Some(err) = Self::pop_failure(&self.create_failures, kind, name) {
            return Err(err);
        }

        self.set_state(kind, name, ResourceState::Ready);
        Ok(())
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> SeedResult<()> {
        self.record("delete", kind, name);

        if let Some(err) = Self::pop_failure(&self.delete_failures, kind, name) {
            return Err(err);
        }

        self.states
            .lock()
            .unwrap()
            .remove(&(kind, name.to_string()));
        Ok(())
    }

    async fn state(&self, kind: ResourceKind, name: &str) -> SeedResult<ResourceState> {
        self.record("state", kind, name);

        if *self.state_lookups_fail.lock().unwrap() {
            return Err(api_error(kind, name, 503));
        }

        Ok(self
            .states
            .lock()
            .unwrap()
            .get(&(kind, name.to_string()))
            .copied()
            .unwrap_or(ResourceState::Missing))
    }
}
