//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber exactly once, before anything logs
//! - Honor `RUST_LOG` when set; otherwise use the configured level
//!
//! JSON output is left to the collector; the seeder emits the standard fmt
//! layer with structured fields.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging. `default_level` applies to this crate's spans when
/// `RUST_LOG` is not set.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("cluster_seeder={},tower_http=info", default_level))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
