//! Status web server subsystem.
//!
//! # Data Flow
//! ```text
//! GET /        → handlers::index → executor.status() → askama template
//! GET /healthz → handlers::healthz (no cluster access)
//! ```

pub mod handlers;
pub mod server;
pub mod templates;

pub use server::{AppState, WebServer};
