//! # Lumos Gateway
//!
//! HTTP gateway between the Lumos search UI and the search backend.
//!
//! ## Architecture
//!
//! - **domain**: Search entities, sessions and the pager window calculation
//! - **application**: Search and debounced suggestion services
//! - **infrastructure**: Backend HTTP client and session storage
//! - **view**: Result cards and pager links ready for rendering
//! - **api**: REST API with Swagger documentation
//! - **server**: Runtime lifecycle shared by the CLI and tests

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod shared;
pub mod view;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use api::{create_api_router, ApiState};

pub use domain::{page_window, PageWindow, PaginationToken};
