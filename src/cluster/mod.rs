//! Kubernetes cluster access subsystem.
//!
//! # Data Flow
//! ```text
//! Ambient config (kubeconfig or in-cluster)
//!     → client.rs (typed API calls with timeouts)
//!     → ops.rs (ClusterOps trait consumed by executor and web layer)
//!     → types.rs (errors, kinds, outcomes)
//! ```
//!
//! # Constraints
//! - All API calls run under a configurable timeout
//! - Secret payloads are never logged
//! - Graceful degradation when the API server is unreachable at startup

pub mod client;
pub mod ops;
pub mod types;

pub use client::ClusterClient;
pub use ops::ClusterOps;
pub use types::{ApplyOutcome, DeleteOutcome, ResourceKind, ResourceState, SeedError, SeedResult};
