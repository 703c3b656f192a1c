//! HTTP API for the now-playing front end
//!
//! Serves the resolved track as JSON, local cover files, and the static front end.

pub mod files;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
pub use server::WebServer;
