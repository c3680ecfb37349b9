//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check resource names are valid RFC 1123 labels
//! - Validate value ranges (replicas, ports, retry bounds)
//! - Check bind addresses parse
//!
//! Returns all validation errors, not just the first. Validation is a pure
//! function over the config and runs before the config is accepted.

use std::net::SocketAddr;

use crate::config::schema::SeederConfig;

/// A single semantic violation found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "deployment.replicas").
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &SeederConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_name(&mut errors, "cluster.namespace", &config.cluster.namespace);
    check_name(&mut errors, "pod.name", &config.pod.name);
    check_name(&mut errors, "deployment.name", &config.deployment.name);
    check_name(&mut errors, "service.name", &config.service.name);
    check_name(&mut errors, "config_map.name", &config.config_map.name);
    check_name(&mut errors, "secret.name", &config.secret.name);
    check_name(&mut errors, "job.name", &config.job.name);

    check_port(&mut errors, "pod.container_port", config.pod.container_port);
    check_port(
        &mut errors,
        "deployment.container_port",
        config.deployment.container_port,
    );
    check_port(&mut errors, "service.port", config.service.port);
    check_port(&mut errors, "service.target_port", config.service.target_port);

    if config.deployment.replicas < 1 {
        errors.push(ValidationError {
            field: "deployment.replicas".to_string(),
            message: format!("must be at least 1, got {}", config.deployment.replicas),
        });
    }

    if config.deployment.app_label.is_empty() {
        errors.push(ValidationError {
            field: "deployment.app_label".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    const SERVICE_TYPES: [&str; 3] = ["ClusterIP", "NodePort", "LoadBalancer"];
    if !SERVICE_TYPES.contains(&config.service.service_type.as_str()) {
        errors.push(ValidationError {
            field: "service.service_type".to_string(),
            message: format!(
                "unknown service type '{}', expected one of {:?}",
                config.service.service_type, SERVICE_TYPES
            ),
        });
    }

    if config.job.command.is_empty() {
        errors.push(ValidationError {
            field: "job.command".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if config.job.backoff_limit < 0 {
        errors.push(ValidationError {
            field: "job.backoff_limit".to_string(),
            message: format!("must not be negative, got {}", config.job.backoff_limit),
        });
    }

    for key in config.config_map.data.keys() {
        if key.is_empty() {
            errors.push(ValidationError {
                field: "config_map.data".to_string(),
                message: "keys must not be empty".to_string(),
            });
        }
    }

    for key in config.secret.string_data.keys() {
        if key.is_empty() {
            errors.push(ValidationError {
                field: "secret.string_data".to_string(),
                message: "keys must not be empty".to_string(),
            });
        }
    }

    if config.retries.max_attempts < 1 {
        errors.push(ValidationError {
            field: "retries.max_attempts".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if config.retries.max_delay_ms < config.retries.base_delay_ms {
        errors.push(ValidationError {
            field: "retries.max_delay_ms".to_string(),
            message: format!(
                "must not be below base_delay_ms ({} < {})",
                config.retries.max_delay_ms, config.retries.base_delay_ms
            ),
        });
    }

    check_addr(&mut errors, "web.bind_address", &config.web.bind_address);
    if config.observability.metrics_enabled {
        check_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 1123 label: lowercase alphanumerics and '-', must start and end
/// alphanumeric, at most 63 characters.
fn is_rfc1123_label(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }
    let valid_chars = name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    let first = name.as_bytes()[0];
    let last = name.as_bytes()[name.len() - 1];
    valid_chars && first != b'-' && last != b'-'
}

fn check_name(errors: &mut Vec<ValidationError>, field: &str, name: &str) {
    if !is_rfc1123_label(name) {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("'{}' is not a valid RFC 1123 label", name),
        });
    }
}

fn check_port(errors: &mut Vec<ValidationError>, field: &str, port: i32) {
    if !(1..=65535).contains(&port) {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("port {} out of range 1-65535", port),
        });
    }
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &str, addr: &str) {
    if addr.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("'{}' is not a valid socket address", addr),
        });
    }
}
