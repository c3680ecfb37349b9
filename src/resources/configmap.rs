//! ConfigMap manifest builder.

use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::schema::ConfigMapConfig;

/// Build the demo config map from its configured key/value payload.
pub fn build_configmap(config: &ConfigMapConfig) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        data: Some(config.data.clone()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configmap_payload() {
        let cm = build_configmap(&ConfigMapConfig::default());
        assert_eq!(cm.metadata.name.as_deref(), Some("demo-config"));
        assert_eq!(cm.data.unwrap().get("example.key").unwrap(), "value");
    }
}
