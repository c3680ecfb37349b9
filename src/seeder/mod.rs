//! Seeding subsystem: the ordered plan and its executor.
//!
//! # Data Flow
//! ```text
//! SeederConfig
//!     → plan.rs (manifests in creation order)
//!     → executor.rs (apply / destroy / status / wait against ClusterOps)
//!     → reports (per-step outcome + attempts)
//! ```

pub mod executor;
pub mod plan;

pub use executor::{DestroyReport, SeedExecutor, SeedReport, StepReport, StepState};
pub use plan::SeedPlan;
