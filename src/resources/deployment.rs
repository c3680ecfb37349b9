//! Deployment manifest builder.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

use crate::config::schema::DeploymentConfig;

/// Build the demo deployment.
///
/// The selector and the pod template carry the exact same `app` label; a
/// mismatch would make the deployment unable to adopt its own pods.
pub fn build_deployment(config: &DeploymentConfig) -> Deployment {
    let labels = app_labels(config);

    let container = Container {
        name: config.container_name.clone(),
        image: Some(config.image.clone()),
        ports: Some(vec![ContainerPort {
            container_port: config.container_port,
            ..Default::default()
        }]),
        ..Default::default()
    };

    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(labels.clone()),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![container],
            ..Default::default()
        }),
    };

    Deployment {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(config.replicas),
            selector: LabelSelector {
                match_labels: Some(labels),
                ..Default::default()
            },
            template,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The `app` label set shared by the deployment selector, its pod template,
/// and the service selector.
pub fn app_labels(config: &DeploymentConfig) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert("app".to_string(), config.app_label.clone());
    labels
}
