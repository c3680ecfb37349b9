//! Cluster-facing types and error definitions.

use serde::Serialize;
use thiserror::Error;

/// The kinds of resources the seeder manages, in no particular order here;
/// [`ResourceKind::SEED_ORDER`] is the authoritative creation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Namespace,
    Pod,
    Deployment,
    Service,
    ConfigMap,
    Secret,
    Job,
}

impl ResourceKind {
    /// Creation order. Deletion runs through this in reverse.
    pub const SEED_ORDER: [ResourceKind; 7] = [
        ResourceKind::Namespace,
        ResourceKind::Pod,
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::Job,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Pod => "Pod",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Job => "Job",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to the cluster.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Client construction or ambient config resolution failed.
    #[error("cluster connection failed: {0}")]
    Connect(#[source] kube::Error),

    /// An API request failed.
    #[error("{kind} '{name}': API error: {source}")]
    Api {
        kind: ResourceKind,
        name: String,
        #[source]
        source: kube::Error,
    },

    /// An API request did not complete within the configured timeout.
    #[error("{kind} '{name}': request timed out after {secs}s")]
    Timeout {
        kind: ResourceKind,
        name: String,
        secs: u64,
    },

    /// Resources did not become ready within the wait deadline.
    #[error("resources not ready after {waited_secs}s (first pending: {kind} '{name}')")]
    NotReady {
        kind: ResourceKind,
        name: String,
        waited_secs: u64,
    },
}

impl SeedError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Covers transport failures, request timeouts, and the HTTP statuses the
    /// API server uses for overload and disruption. Semantic 4xx errors are
    /// never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            SeedError::Timeout { .. } => true,
            SeedError::Api { source, .. } => match source {
                kube::Error::Api(ae) => matches!(ae.code, 408 | 429 | 500 | 502 | 503 | 504),
                kube::Error::HyperError(_) | kube::Error::Service(_) => true,
                _ => false,
            },
            _ => false,
        }
    }

    /// Whether the error is the API server reporting the resource already
    /// exists (HTTP 409). Treated as success on re-runs.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            SeedError::Api {
                source: kube::Error::Api(ae),
                ..
            } if ae.code == 409
        )
    }

    /// Whether the error is a 404 for the target resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SeedError::Api {
                source: kube::Error::Api(ae),
                ..
            } if ae.code == 404
        )
    }
}

/// Result type for cluster operations.
pub type SeedResult<T> = Result<T, SeedError>;

/// Outcome of applying one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplyOutcome {
    /// The resource was created by this run.
    Created,
    /// The resource already existed; nothing was changed.
    Unchanged,
}

/// Outcome of deleting one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteOutcome {
    /// The delete was accepted by the API server.
    Deleted,
    /// The resource was already gone.
    Missing,
}

/// Observed state of a resource, as shown by `status` and the web page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceState {
    /// Not present in the cluster.
    Missing,
    /// Present but not yet ready (pod starting, replicas scaling, job running).
    Pending,
    /// Present and ready per its kind's readiness rule.
    Ready,
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceState::Missing => "missing",
            ResourceState::Pending => "pending",
            ResourceState::Ready => "ready",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> SeedError {
        SeedError::Api {
            kind: ResourceKind::Pod,
            name: "demo-pod".to_string(),
            source: kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: format!("{} ({})", reason, code),
                reason: reason.to_string(),
                code,
            }),
        }
    }

    #[test]
    fn test_seed_order_starts_with_namespace_ends_with_job() {
        assert_eq!(ResourceKind::SEED_ORDER[0], ResourceKind::Namespace);
        assert_eq!(ResourceKind::SEED_ORDER[6], ResourceKind::Job);
        assert_eq!(ResourceKind::SEED_ORDER.len(), 7);
    }

    #[test]
    fn test_transient_classification() {
        assert!(api_error(503, "ServiceUnavailable").is_transient());
        assert!(api_error(429, "TooManyRequests").is_transient());
        assert!(!api_error(403, "Forbidden").is_transient());
        assert!(!api_error(409, "AlreadyExists").is_transient());
        let timeout = SeedError::Timeout {
            kind: ResourceKind::Job,
            name: "pi-job".to_string(),
            secs: 15,
        };
        assert!(timeout.is_transient());
    }

    #[test]
    fn test_already_exists_and_not_found() {
        assert!(api_error(409, "AlreadyExists").is_already_exists());
        assert!(!api_error(409, "AlreadyExists").is_not_found());
        assert!(api_error(404, "NotFound").is_not_found());
        assert!(!api_error(500, "InternalError").is_already_exists());
    }

    #[test]
    fn test_error_display() {
        let err = api_error(409, "AlreadyExists");
        let text = err.to_string();
        assert!(text.contains("Pod"));
        assert!(text.contains("demo-pod"));

        let err = SeedError::Timeout {
            kind: ResourceKind::Namespace,
            name: "demo-namespace".to_string(),
            secs: 15,
        };
        assert_eq!(
            err.to_string(),
            "Namespace 'demo-namespace': request timed out after 15s"
        );
    }
}
