//! REST API of the gateway
//!
//! Proxy endpoints for the browser client, the results page model,
//! search sessions, health, metrics and OpenAPI docs.

pub mod common;
pub mod dto;
mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
