//! Tourbase HTTP server
//!
//! Wires the tenant-scoped stores, the email queue processor, and the
//! locale-routing middleware into one axum application. The binary in
//! `main.rs` is the composition root; everything here is reusable from
//! integration tests.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
