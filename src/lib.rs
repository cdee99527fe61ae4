//! Prompt Export API
//!
//! A read-only HTTP service over the classifier's categorized prompt export.
//! `GET /prompts` serves filtered, size-limited slices of the export file and
//! `GET /health` answers liveness probes.

pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
