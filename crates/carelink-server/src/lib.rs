//! HTTP server for Carelink.
//!
//! Maps the client registry, program catalog, and enrollment ledger onto a
//! REST/JSON API. Handlers stay thin: extract, delegate to the component,
//! translate the typed result into a response. Error mapping is uniform —
//! validation failures are 400s, missing records are 404s, store faults
//! are 500s, and every error body is `{"message": ...}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ApiError, ApiJson, ServerError, ServerResult};
pub use router::build_router;
pub use server::CarelinkServer;
pub use state::AppState;
