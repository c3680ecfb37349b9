//! Service manifest builder.

use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::config::schema::{DeploymentConfig, ServiceConfig};
use crate::resources::deployment::app_labels;

/// Build the service fronting the deployment's pods.
///
/// The selector is derived from the deployment config so the two cannot
/// drift apart.
pub fn build_service(config: &ServiceConfig, deployment: &DeploymentConfig) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(app_labels(deployment)),
            ports: Some(vec![ServicePort {
                port: config.port,
                target_port: Some(IntOrString::Int(config.target_port)),
                ..Default::default()
            }]),
            type_: Some(config.service_type.clone()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_ports_and_type() {
        let service = build_service(&ServiceConfig::default(), &DeploymentConfig::default());
        assert_eq!(service.metadata.name.as_deref(), Some("nginx-service"));

        let spec = service.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
        let port = &spec.ports.unwrap()[0];
        assert_eq!(port.port, 80);
        assert_eq!(port.target_port, Some(IntOrString::Int(80)));
    }

    #[test]
    fn test_selector_follows_deployment_label() {
        let mut deployment = DeploymentConfig::default();
        deployment.app_label = "api".to_string();

        let service = build_service(&ServiceConfig::default(), &deployment);
        let selector = service.spec.unwrap().selector.unwrap();
        assert_eq!(selector.get("app").unwrap(), "api");
    }
}
