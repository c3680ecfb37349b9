//! Batch job manifest builder.

use std::collections::BTreeMap;

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::schema::JobConfig;

/// Build the one-shot computation job.
///
/// restartPolicy must be Never or OnFailure for job pods; the seeder uses
/// Never and leaves retries to the job controller via backoffLimit.
pub fn build_job(config: &JobConfig) -> Job {
    let mut labels = BTreeMap::new();
    labels.insert("job".to_string(), config.job_label.clone());

    let container = Container {
        name: config.container_name.clone(),
        image: Some(config.image.clone()),
        command: Some(config.command.clone()),
        ..Default::default()
    };

    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(labels),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            restart_policy: Some("Never".to_string()),
            containers: vec![container],
            ..Default::default()
        }),
    };

    Job {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        spec: Some(JobSpec {
            template,
            backoff_limit: Some(config.backoff_limit),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_command_and_backoff() {
        let job = build_job(&JobConfig::default());
        assert_eq!(job.metadata.name.as_deref(), Some("pi-job"));

        let spec = job.spec.unwrap();
        assert_eq!(spec.backoff_limit, Some(4));

        let pod_spec = spec.template.spec.unwrap();
        assert_eq!(pod_spec.restart_policy.as_deref(), Some("Never"));
        let container = &pod_spec.containers[0];
        assert_eq!(container.name, "pi");
        assert_eq!(container.image.as_deref(), Some("perl"));
        assert_eq!(
            container.command.as_ref().unwrap(),
            &vec![
                "perl".to_string(),
                "-Mbignum=bpi".to_string(),
                "-wle".to_string(),
                "print bpi(2000)".to_string(),
            ]
        );
    }

    #[test]
    fn test_job_template_label() {
        let job = build_job(&JobConfig::default());
        let labels = job
            .spec
            .unwrap()
            .template
            .metadata
            .unwrap()
            .labels
            .unwrap();
        assert_eq!(labels.get("job").unwrap(), "pi");
    }
}
