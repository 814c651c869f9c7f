//! API layer - HTTP handlers and middleware
//!
//! - Request handlers and DTOs
//! - Bearer token middleware
//! - Validated JSON extractor
//! - Route definitions

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
