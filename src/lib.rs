//! Kubernetes demo environment seeder.
//!
//! Seeds a namespace and six demo resources (pod, deployment, service,
//! config map, secret, batch job) into a cluster in a fixed order, tears
//! them down in reverse, and serves a one-page status UI.
//!
//! # Architecture Overview
//!
//! ```text
//!   config ──▶ seeder::plan ──▶ seeder::executor ──▶ cluster::ClusterOps
//!                  │                                       │
//!                  └──────────▶ web (status page) ◀────────┘
//!
//!   Cross-cutting: observability (tracing + metrics), resilience
//!   (retry/backoff), lifecycle (shutdown signals)
//! ```

// Core subsystems
pub mod cluster;
pub mod config;
pub mod resources;
pub mod seeder;

// Status server
pub mod web;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use cluster::{ClusterClient, ClusterOps};
pub use config::SeederConfig;
pub use lifecycle::Shutdown;
pub use seeder::{SeedExecutor, SeedPlan};
pub use web::WebServer;
