//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Connect cluster → Dispatch subcommand
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → broadcast → server drains and exits
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - One-shot subcommands exit on completion; only `serve` waits for signals

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
