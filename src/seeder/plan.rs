//! The ordered seed plan.
//!
//! # Design Decisions
//! - Creation order is fixed: namespace first, then pod, deployment,
//!   service, config map, secret, job
//! - Deletion is the exact reverse
//! - Building a plan never touches the cluster

use crate::config::schema::SeederConfig;
use crate::resources::{
    build_configmap, build_deployment, build_job, build_namespace, build_pod, build_secret,
    build_service, SeedResource,
};

/// The full ordered set of manifests for one demo environment.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    namespace: String,
    resources: Vec<SeedResource>,
}

impl SeedPlan {
    /// Build the plan from config, in creation order.
    pub fn from_config(config: &SeederConfig) -> Self {
        let resources = vec![
            SeedResource::Namespace(build_namespace(&config.cluster)),
            SeedResource::Pod(build_pod(&config.pod)),
            SeedResource::Deployment(build_deployment(&config.deployment)),
            SeedResource::Service(build_service(&config.service, &config.deployment)),
            SeedResource::ConfigMap(build_configmap(&config.config_map)),
            SeedResource::Secret(build_secret(&config.secret)),
            SeedResource::Job(build_job(&config.job)),
        ];

        Self {
            namespace: config.cluster.namespace.clone(),
            resources,
        }
    }

    /// Steps in creation order.
    pub fn steps(&self) -> &[SeedResource] {
        &self.resources
    }

    /// Steps in deletion order (reverse of creation).
    pub fn steps_reversed(&self) -> impl Iterator<Item = &SeedResource> {
        self.resources.iter().rev()
    }

    /// The namespace everything is seeded into.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Human-readable rendering for the `plan` subcommand.
    pub fn render(&self) -> String {
        let mut out = format!("Seed plan for namespace '{}':\n", self.namespace);
        for (i, resource) in self.resources.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {:<10} {}\n",
                i + 1,
                resource.kind().as_str(),
                resource.name()
            ));
        }
        out
    }
}
