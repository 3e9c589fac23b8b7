//! Parley API crate - axum HTTP server and route handlers.
//!
//! Exposes the answer pipeline over JSON: chat, health, and per-user
//! history.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
