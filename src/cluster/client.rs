//! Kubernetes API client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect using ambient configuration (kubeconfig, else in-cluster)
//! - Issue typed create/delete/get calls for the seeded resource kinds
//! - Enforce a per-request timeout
//! - Probe API server reachability at startup

use std::fmt::Debug;
use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Pod, Secret, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, PostParams};
use serde::de::DeserializeOwned;

use crate::cluster::ops::ClusterOps;
use crate::cluster::types::{ResourceKind, ResourceState, SeedError, SeedResult};
use crate::config::schema::ClusterConfig;
use crate::observability::metrics;
use crate::resources::SeedResource;

/// Typed client wrapper around `kube::Client`.
#[derive(Clone)]
pub struct ClusterClient {
    client: kube::Client,
    namespace: String,
    timeout: Duration,
}

impl ClusterClient {
    /// Connect using ambient configuration.
    ///
    /// `kube::Client::try_default()` resolves a local kubeconfig first and
    /// falls back to in-cluster service account credentials when running
    /// inside a pod.
    pub async fn connect(config: &ClusterConfig) -> SeedResult<Self> {
        let client = kube::Client::try_default()
            .await
            .map_err(SeedError::Connect)?;

        let cluster = Self {
            client,
            namespace: config.namespace.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        };

        // Reachability probe. Failure is logged, not fatal: the first real
        // call will produce the actionable error.
        match cluster.client.apiserver_version().await {
            Ok(info) => {
                tracing::info!(
                    server_version = %info.git_version,
                    namespace = %cluster.namespace,
                    "Connected to cluster"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Connected but API server version probe failed");
            }
        }

        Ok(cluster)
    }

    fn namespaced<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    /// Run one API call under the configured timeout, mapping failures into
    /// [`SeedError`] and recording the call metric.
    async fn run<T, F>(
        &self,
        verb: &'static str,
        kind: ResourceKind,
        name: &str,
        fut: F,
    ) -> SeedResult<T>
    where
        F: Future<Output = Result<T, kube::Error>>,
    {
        let start = Instant::now();
        let result = match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(SeedError::Api {
                kind,
                name: name.to_string(),
                source: e,
            }),
            Err(_) => Err(SeedError::Timeout {
                kind,
                name: name.to_string(),
                secs: self.timeout.as_secs(),
            }),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) if e.is_transient() => "transient_error",
            Err(_) => "error",
        };
        metrics::record_api_call(verb, kind, outcome, start);

        result
    }

    async fn create_in<K>(
        &self,
        api: Api<K>,
        kind: ResourceKind,
        name: &str,
        manifest: &K,
    ) -> SeedResult<()>
    where
        K: Clone + DeserializeOwned + serde::Serialize + Debug,
    {
        let pp = PostParams::default();
        self.run("create", kind, name, api.create(&pp, manifest))
            .await
            .map(drop)
    }

    async fn delete_in<K>(&self, api: Api<K>, kind: ResourceKind, name: &str) -> SeedResult<()>
    where
        K: Clone + DeserializeOwned + Debug,
    {
        let dp = DeleteParams::default();
        self.run("delete", kind, name, async {
            api.delete(name, &dp).await.map(drop)
        })
        .await
    }

    async fn get_in<K>(&self, api: Api<K>, kind: ResourceKind, name: &str) -> SeedResult<Option<K>>
    where
        K: Clone + DeserializeOwned + Debug,
    {
        self.run("get", kind, name, api.get_opt(name)).await
    }
}

#[async_trait]
impl ClusterOps for ClusterClient {
    async fn create(&self, resource: &SeedResource) -> SeedResult<()> {
        let kind = resource.kind();
        let name = resource.name();
        match resource {
            SeedResource::Namespace(ns) => {
                self.create_in(self.namespaces(), kind, name, ns).await
            }
            SeedResource::Pod(pod) => {
                self.create_in(self.namespaced::<Pod>(), kind, name, pod)
                    .await
            }
            SeedResource::Deployment(d) => {
                self.create_in(self.namespaced::<Deployment>(), kind, name, d)
                    .await
            }
            SeedResource::Service(s) => {
                self.create_in(self.namespaced::<Service>(), kind, name, s)
                    .await
            }
            SeedResource::ConfigMap(cm) => {
                self.create_in(self.namespaced::<ConfigMap>(), kind, name, cm)
                    .await
            }
            SeedResource::Secret(s) => {
                self.create_in(self.namespaced::<Secret>(), kind, name, s)
                    .await
            }
            SeedResource::Job(j) => {
                self.create_in(self.namespaced::<Job>(), kind, name, j)
                    .await
            }
        }
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> SeedResult<()> {
        match kind {
            ResourceKind::Namespace => self.delete_in(self.namespaces(), kind, name).await,
            ResourceKind::Pod => self.delete_in(self.namespaced::<Pod>(), kind, name).await,
            ResourceKind::Deployment => {
                self.delete_in(self.namespaced::<Deployment>(), kind, name)
                    .await
            }
            ResourceKind::Service => {
                self.delete_in(self.namespaced::<Service>(), kind, name)
                    .await
            }
            ResourceKind::ConfigMap => {
                self.delete_in(self.namespaced::<ConfigMap>(), kind, name)
                    .await
            }
            ResourceKind::Secret => {
                self.delete_in(self.namespaced::<Secret>(), kind, name)
                    .await
            }
            ResourceKind::Job => self.delete_in(self.namespaced::<Job>(), kind, name).await,
        }
    }

    async fn state(&self, kind: ResourceKind, name: &str) -> SeedResult<ResourceState> {
        match kind {
            ResourceKind::Namespace => {
                let ns = self.get_in(self.namespaces(), kind, name).await?;
                Ok(existence(ns))
            }
            ResourceKind::Pod => {
                let pod = self.get_in(self.namespaced::<Pod>(), kind, name).await?;
                Ok(match pod {
                    None => ResourceState::Missing,
                    Some(pod) => pod_state(&pod),
                })
            }
            ResourceKind::Deployment => {
                let deployment = self
                    .get_in(self.namespaced::<Deployment>(), kind, name)
                    .await?;
                Ok(match deployment {
                    None => ResourceState::Missing,
                    Some(d) => deployment_state(&d),
                })
            }
            ResourceKind::Service => {
                let svc = self.get_in(self.namespaced::<Service>(), kind, name).await?;
                Ok(existence(svc))
            }
            ResourceKind::ConfigMap => {
                let cm = self
                    .get_in(self.namespaced::<ConfigMap>(), kind, name)
                    .await?;
                Ok(existence(cm))
            }
            ResourceKind::Secret => {
                let secret = self.get_in(self.namespaced::<Secret>(), kind, name).await?;
                Ok(existence(secret))
            }
            ResourceKind::Job => {
                let job = self.get_in(self.namespaced::<Job>(), kind, name).await?;
                Ok(match job {
                    None => ResourceState::Missing,
                    Some(j) => job_state(&j),
                })
            }
        }
    }
}

fn existence<K>(resource: Option<K>) -> ResourceState {
    if resource.is_some() {
        ResourceState::Ready
    } else {
        ResourceState::Missing
    }
}

fn pod_state(pod: &Pod) -> ResourceState {
    let phase = pod
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .unwrap_or("");
    match phase {
        "Running" | "Succeeded" => ResourceState::Ready,
        _ => ResourceState::Pending,
    }
}

fn deployment_state(deployment: &Deployment) -> ResourceState {
    let desired = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(1);
    let available = deployment
        .status
        .as_ref()
        .and_then(|s| s.available_replicas)
        .unwrap_or(0);
    if available >= desired {
        ResourceState::Ready
    } else {
        ResourceState::Pending
    }
}

fn job_state(job: &Job) -> ResourceState {
    let succeeded = job
        .status
        .as_ref()
        .and_then(|s| s.succeeded)
        .unwrap_or(0);
    if succeeded >= 1 {
        ResourceState::Ready
    } else {
        ResourceState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DeploymentStatus;
    use k8s_openapi::api::batch::v1::JobStatus;
    use k8s_openapi::api::core::v1::PodStatus;

    #[test]
    fn test_pod_state_from_phase() {
        let mut pod = Pod::default();
        assert_eq!(pod_state(&pod), ResourceState::Pending);

        pod.status = Some(PodStatus {
            phase: Some("Running".to_string()),
            ..Default::default()
        });
        assert_eq!(pod_state(&pod), ResourceState::Ready);

        pod.status = Some(PodStatus {
            phase: Some("Pending".to_string()),
            ..Default::default()
        });
        assert_eq!(pod_state(&pod), ResourceState::Pending);
    }

    #[test]
    fn test_deployment_state_counts_available_replicas() {
        let mut deployment = crate::resources::build_deployment(
            &crate::config::schema::DeploymentConfig::default(),
        );
        assert_eq!(deployment_state(&deployment), ResourceState::Pending);

        deployment.status = Some(DeploymentStatus {
            available_replicas: Some(3),
            ..Default::default()
        });
        assert_eq!(deployment_state(&deployment), ResourceState::Ready);

        deployment.status = Some(DeploymentStatus {
            available_replicas: Some(2),
            ..Default::default()
        });
        assert_eq!(deployment_state(&deployment), ResourceState::Pending);
    }

    #[test]
    fn test_job_state_requires_a_success() {
        let mut job = crate::resources::build_job(&crate::config::schema::JobConfig::default());
        assert_eq!(job_state(&job), ResourceState::Pending);

        job.status = Some(JobStatus {
            succeeded: Some(1),
            ..Default::default()
        });
        assert_eq!(job_state(&job), ResourceState::Ready);
    }
}
