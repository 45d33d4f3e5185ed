//! API module
//!
//! HTTP endpoints and request-logging middleware.

pub mod middleware;
pub mod routes;

pub use routes::create_router;
