//! Standalone pod manifest builder.

use k8s_openapi::api::core::v1::{Container, ContainerPort, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::schema::PodConfig;

/// Build the standalone demo pod: a single container exposing one port.
pub fn build_pod(config: &PodConfig) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: config.container_name.clone(),
                image: Some(config.image.clone()),
                ports: Some(vec![ContainerPort {
                    container_port: config.container_port,
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_container_and_port() {
        let pod = build_pod(&PodConfig::default());
        assert_eq!(pod.metadata.name.as_deref(), Some("demo-pod"));

        let spec = pod.spec.unwrap();
        assert_eq!(spec.containers.len(), 1);
        let container = &spec.containers[0];
        assert_eq!(container.name, "nginx");
        assert_eq!(container.image.as_deref(), Some("nginx"));
        assert_eq!(container.ports.as_ref().unwrap()[0].container_port, 80);
    }
}
