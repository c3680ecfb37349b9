//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the seeder.
//! All types derive Serde traits for deserialization from config files, and
//! every default reproduces the literal demo payloads the tool seeds out of
//! the box.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the seeder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SeederConfig {
    /// Cluster connection settings (namespace, timeouts).
    pub cluster: ClusterConfig,

    /// Standalone demo pod.
    pub pod: PodConfig,

    /// Demo deployment.
    pub deployment: DeploymentConfig,

    /// ClusterIP service fronting the deployment.
    pub service: ServiceConfig,

    /// Demo config map.
    pub config_map: ConfigMapConfig,

    /// Demo secret.
    pub secret: SecretConfig,

    /// One-shot batch job.
    pub job: JobConfig,

    /// Retry configuration for transient API errors.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Status web server settings.
    pub web: WebConfig,
}

/// Cluster connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Namespace all seeded resources live in. Created by the first step.
    pub namespace: String,

    /// Per-request timeout for API calls in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: "demo-namespace".to_string(),
            request_timeout_secs: 15,
        }
    }
}

/// Standalone pod configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PodConfig {
    /// Pod name.
    pub name: String,

    /// Container name.
    pub container_name: String,

    /// Container image.
    pub image: String,

    /// Exposed container port.
    pub container_port: i32,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            name: "demo-pod".to_string(),
            container_name: "nginx".to_string(),
            image: "nginx".to_string(),
            container_port: 80,
        }
    }
}

/// Deployment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Deployment name.
    pub name: String,

    /// Desired replica count.
    pub replicas: i32,

    /// Label value for the `app` selector. Selector and pod template always
    /// carry the same labels.
    pub app_label: String,

    /// Container name.
    pub container_name: String,

    /// Container image.
    pub image: String,

    /// Exposed container port.
    pub container_port: i32,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            name: "nginx-deployment".to_string(),
            replicas: 3,
            app_label: "nginx".to_string(),
            container_name: "nginx".to_string(),
            image: "nginx".to_string(),
            container_port: 80,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name.
    pub name: String,

    /// Service port.
    pub port: i32,

    /// Target port on the selected pods.
    pub target_port: i32,

    /// Service type (ClusterIP, NodePort, LoadBalancer).
    pub service_type: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "nginx-service".to_string(),
            port: 80,
            target_port: 80,
            service_type: "ClusterIP".to_string(),
        }
    }
}

/// Config map configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigMapConfig {
    /// ConfigMap name.
    pub name: String,

    /// Key/value payload.
    pub data: BTreeMap<String, String>,
}

impl Default for ConfigMapConfig {
    fn default() -> Self {
        let mut data = BTreeMap::new();
        data.insert("example.key".to_string(), "value".to_string());
        Self {
            name: "demo-config".to_string(),
            data,
        }
    }
}

/// Secret configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretConfig {
    /// Secret name.
    pub name: String,

    /// Secret type.
    pub secret_type: String,

    /// Plaintext payload; the API server handles encoding.
    pub string_data: BTreeMap<String, String>,
}

impl Default for SecretConfig {
    fn default() -> Self {
        let mut string_data = BTreeMap::new();
        string_data.insert("password".to_string(), "supersecret".to_string());
        Self {
            name: "demo-secret".to_string(),
            secret_type: "Opaque".to_string(),
            string_data,
        }
    }
}

/// Batch job configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JobConfig {
    /// Job name.
    pub name: String,

    /// Container name.
    pub container_name: String,

    /// Container image.
    pub image: String,

    /// Container command.
    pub command: Vec<String>,

    /// Label value for the `job` template label.
    pub job_label: String,

    /// Pod retries before the job is marked failed.
    pub backoff_limit: i32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: "pi-job".to_string(),
            container_name: "pi".to_string(),
            image: "perl".to_string(),
            command: vec![
                "perl".to_string(),
                "-Mbignum=bpi".to_string(),
                "-wle".to_string(),
                "print bpi(2000)".to_string(),
            ],
            job_label: "pi".to_string(),
            backoff_limit: 4,
        }
    }
}

/// Retry configuration for transient API errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts per resource (including the first).
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 3000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Status web server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for the status page (e.g. "127.0.0.1:8088").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8088".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_payloads() {
        let config = SeederConfig::default();
        assert_eq!(config.cluster.namespace, "demo-namespace");
        assert_eq!(config.pod.name, "demo-pod");
        assert_eq!(config.deployment.name, "nginx-deployment");
        assert_eq!(config.deployment.replicas, 3);
        assert_eq!(config.service.service_type, "ClusterIP");
        assert_eq!(config.config_map.data.get("example.key").unwrap(), "value");
        assert_eq!(
            config.secret.string_data.get("password").unwrap(),
            "supersecret"
        );
        assert_eq!(config.job.backoff_limit, 4);
        assert_eq!(config.job.command[0], "perl");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: SeederConfig = toml::from_str(
            r#"
            [cluster]
            namespace = "staging-demo"

            [deployment]
            replicas = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster.namespace, "staging-demo");
        assert_eq!(config.deployment.replicas, 1);
        // Untouched sections keep their demo defaults.
        assert_eq!(config.pod.image, "nginx");
        assert_eq!(config.job.name, "pi-job");
    }
}
