//! Plan execution against a cluster.
//!
//! # Responsibilities
//! - Apply the plan step by step, in order
//! - Retry transient API errors with backoff, fail fast otherwise
//! - Map 409/404 responses onto idempotent outcomes
//! - Tear down in reverse order
//! - Poll for readiness after apply

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cluster::ops::ClusterOps;
use crate::cluster::types::{
    ApplyOutcome, DeleteOutcome, ResourceKind, ResourceState, SeedError, SeedResult,
};
use crate::observability::metrics;
use crate::resilience::retry::RetryPolicy;
use crate::resources::SeedResource;
use crate::seeder::plan::SeedPlan;

/// Interval between readiness polls.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Result of applying one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub kind: ResourceKind,
    pub name: String,
    pub outcome: ApplyOutcome,
    pub attempts: u32,
}

/// Result of a full apply run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub run_id: Uuid,
    pub namespace: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub steps: Vec<StepReport>,
}

impl SeedReport {
    /// True when every step reported `Unchanged` (the re-run case).
    pub fn is_noop(&self) -> bool {
        self.steps
            .iter()
            .all(|s| s.outcome == ApplyOutcome::Unchanged)
    }
}

/// Result of a full destroy run.
#[derive(Debug, Clone, Serialize)]
pub struct DestroyReport {
    pub run_id: Uuid,
    pub namespace: String,
    pub steps: Vec<DestroyStepReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestroyStepReport {
    pub kind: ResourceKind,
    pub name: String,
    pub outcome: DeleteOutcome,
    pub attempts: u32,
}

/// Observed state of one planned resource.
#[derive(Debug, Clone, Serialize)]
pub struct StepState {
    pub kind: ResourceKind,
    pub name: String,
    pub state: ResourceState,
}

/// Drives a [`SeedPlan`] against any [`ClusterOps`] implementation.
pub struct SeedExecutor<C> {
    cluster: C,
    policy: RetryPolicy,
}

impl<C: ClusterOps> SeedExecutor<C> {
    pub fn new(cluster: C, policy: RetryPolicy) -> Self {
        Self { cluster, policy }
    }

    /// Apply every step in order.
    ///
    /// A step that already exists is reported `Unchanged` and the run
    /// continues; the first non-transient error aborts the run.
    pub async fn apply(&self, plan: &SeedPlan) -> SeedResult<SeedReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            run_id = %run_id,
            namespace = %plan.namespace(),
            steps = plan.steps().len(),
            "Seeding demo environment"
        );

        let mut steps = Vec::with_capacity(plan.steps().len());
        for resource in plan.steps() {
            let report = self.apply_step(resource).await?;
            tracing::info!(
                run_id = %run_id,
                kind = %report.kind,
                name = %report.name,
                outcome = ?report.outcome,
                attempts = report.attempts,
                "Step complete"
            );
            steps.push(report);
        }

        let report = SeedReport {
            run_id,
            namespace: plan.namespace().to_string(),
            started_at,
            elapsed_ms: start.elapsed().as_millis() as u64,
            steps,
        };

        tracing::info!(
            run_id = %run_id,
            elapsed_ms = report.elapsed_ms,
            noop = report.is_noop(),
            "Seed run complete"
        );

        Ok(report)
    }

    async fn apply_step(&self, resource: &SeedResource) -> SeedResult<StepReport> {
        let kind = resource.kind();
        let name = resource.name().to_string();
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.cluster.create(resource).await {
                Ok(()) => {
                    return Ok(StepReport {
                        kind,
                        name,
                        outcome: ApplyOutcome::Created,
                        attempts,
                    });
                }
                Err(e) if e.is_already_exists() => {
                    return Ok(StepReport {
                        kind,
                        name,
                        outcome: ApplyOutcome::Unchanged,
                        attempts,
                    });
                }
                Err(e) if e.is_transient() && attempts < self.policy.attempts() => {
                    let delay = self.policy.delay_for(attempts);
                    tracing::warn!(
                        kind = %kind,
                        name = %name,
                        attempt = attempts,
                        delay = ?delay,
                        error = %e,
                        "Transient API error, retrying"
                    );
                    metrics::record_retry(kind);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Delete every planned resource in reverse order.
    ///
    /// Missing resources are reported, not errors, so destroy is idempotent
    /// too.
    pub async fn destroy(&self, plan: &SeedPlan) -> SeedResult<DestroyReport> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            run_id = %run_id,
            namespace = %plan.namespace(),
            "Destroying demo environment"
        );

        let mut steps = Vec::with_capacity(plan.steps().len());
        for resource in plan.steps_reversed() {
            let report = self.destroy_step(resource).await?;
            tracing::info!(
                run_id = %run_id,
                kind = %report.kind,
                name = %report.name,
                outcome = ?report.outcome,
                "Step complete"
            );
            steps.push(report);
        }

        Ok(DestroyReport {
            run_id,
            namespace: plan.namespace().to_string(),
            steps,
        })
    }

    async fn destroy_step(&self, resource: &SeedResource) -> SeedResult<DestroyStepReport> {
        let kind = resource.kind();
        let name = resource.name().to_string();
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.cluster.delete(kind, &name).await {
                Ok(()) => {
                    return Ok(DestroyStepReport {
                        kind,
                        name,
                        outcome: DeleteOutcome::Deleted,
                        attempts,
                    });
                }
                Err(e) if e.is_not_found() => {
                    return Ok(DestroyStepReport {
                        kind,
                        name,
                        outcome: DeleteOutcome::Missing,
                        attempts,
                    });
                }
                Err(e) if e.is_transient() && attempts < self.policy.attempts() => {
                    let delay = self.policy.delay_for(attempts);
                    tracing::warn!(
                        kind = %kind,
                        name = %name,
                        attempt = attempts,
                        delay = ?delay,
                        error = %e,
                        "Transient API error, retrying"
                    );
                    metrics::record_retry(kind);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Observe the state of every planned resource, in plan order.
    pub async fn status(&self, plan: &SeedPlan) -> SeedResult<Vec<StepState>> {
        let mut states = Vec::with_capacity(plan.steps().len());
        for resource in plan.steps() {
            let state = self
                .cluster
                .state(resource.kind(), resource.name())
                .await?;
            states.push(StepState {
                kind: resource.kind(),
                name: resource.name().to_string(),
                state,
            });
        }
        Ok(states)
    }

    /// Poll until every planned resource is ready or the deadline passes.
    pub async fn wait_ready(&self, plan: &SeedPlan, timeout: Duration) -> SeedResult<()> {
        let deadline = Instant::now() + timeout;
        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        loop {
            ticker.tick().await;

            let states = self.status(plan).await?;
            match states.iter().find(|s| s.state != ResourceState::Ready) {
                None => {
                    tracing::info!(namespace = %plan.namespace(), "All resources ready");
                    return Ok(());
                }
                Some(pending) => {
                    tracing::debug!(
                        kind = %pending.kind,
                        name = %pending.name,
                        state = %pending.state,
                        "Waiting for readiness"
                    );
                    if Instant::now() >= deadline {
                        return Err(SeedError::NotReady {
                            kind: pending.kind,
                            name: pending.name.clone(),
                            waited_secs: timeout.as_secs(),
                        });
                    }
                }
            }
        }
    }
}
