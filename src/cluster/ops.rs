//! Cluster operations trait.
//!
//! The executor and the web layer depend on this abstraction rather than on
//! a concrete transport, so tests can substitute an in-memory cluster and
//! the real client stays swappable.

use async_trait::async_trait;

use crate::cluster::types::{ResourceKind, ResourceState, SeedResult};
use crate::resources::SeedResource;

/// The three operations the seeder needs from a cluster.
#[async_trait]
pub trait ClusterOps: Send + Sync {
    /// Create the resource. A 409 from the API server surfaces as an error;
    /// mapping it to an idempotent no-op is the caller's policy.
    async fn create(&self, resource: &SeedResource) -> SeedResult<()>;

    /// Delete the named resource of the given kind.
    async fn delete(&self, kind: ResourceKind, name: &str) -> SeedResult<()>;

    /// Observe the current state of the named resource.
    async fn state(&self, kind: ResourceKind, name: &str) -> SeedResult<ResourceState>;
}

#[async_trait]
impl<T: ClusterOps + ?Sized> ClusterOps for std::sync::Arc<T> {
    async fn create(&self, resource: &SeedResource) -> SeedResult<()> {
        (**self).create(resource).await
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> SeedResult<()> {
        (**self).delete(kind, name).await
    }

    async fn state(&self, kind: ResourceKind, name: &str) -> SeedResult<ResourceState> {
        (**self).state(kind, name).await
    }
}
