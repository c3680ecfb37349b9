//! Namespace manifest builder.

use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::schema::ClusterConfig;

/// Build the namespace every other seeded resource lives in.
pub fn build_namespace(config: &ClusterConfig) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(config.namespace.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_name() {
        let ns = build_namespace(&ClusterConfig::default());
        assert_eq!(ns.metadata.name.as_deref(), Some("demo-namespace"));
        assert!(ns.spec.is_none());
    }
}
