//! Typed manifest builders for every resource the seeder manages.
//!
//! Each builder is a pure function from a config section to the
//! corresponding `k8s-openapi` struct. Nothing here touches the network;
//! manifests are constructed once and handed to the cluster layer.

pub mod configmap;
pub mod deployment;
pub mod job;
pub mod namespace;
pub mod pod;
pub mod secret;
pub mod service;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Pod, Secret, Service};

use crate::cluster::types::ResourceKind;

pub use configmap::build_configmap;
pub use deployment::build_deployment;
pub use job::build_job;
pub use namespace::build_namespace;
pub use pod::build_pod;
pub use secret::build_secret;
pub use service::build_service;

/// A manifest ready to be sent to the cluster, tagged by kind.
#[derive(Debug, Clone)]
pub enum SeedResource {
    Namespace(Namespace),
    Pod(Pod),
    Deployment(Deployment),
    Service(Service),
    ConfigMap(ConfigMap),
    Secret(Secret),
    Job(Job),
}

impl SeedResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            SeedResource::Namespace(_) => ResourceKind::Namespace,
            SeedResource::Pod(_) => ResourceKind::Pod,
            SeedResource::Deployment(_) => ResourceKind::Deployment,
            SeedResource::Service(_) => ResourceKind::Service,
            SeedResource::ConfigMap(_) => ResourceKind::ConfigMap,
            SeedResource::Secret(_) => ResourceKind::Secret,
            SeedResource::Job(_) => ResourceKind::Job,
        }
    }

    /// Name from the manifest metadata. Builders always set one.
    pub fn name(&self) -> &str {
        let name = match self {
            SeedResource::Namespace(r) => r.metadata.name.as_deref(),
            SeedResource::Pod(r) => r.metadata.name.as_deref(),
            SeedResource::Deployment(r) => r.metadata.name.as_deref(),
            SeedResource::Service(r) => r.metadata.name.as_deref(),
            SeedResource::ConfigMap(r) => r.metadata.name.as_deref(),
            SeedResource::Secret(r) => r.metadata.name.as_deref(),
            SeedResource::Job(r) => r.metadata.name.as_deref(),
        };
        name.unwrap_or("")
    }
}
