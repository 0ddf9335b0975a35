//! Backend trait definitions

use async_trait::async_trait;

use crate::domain::{BackendError, SearchPage};

/// The external search service
///
/// `page` is zero-based on this side of the boundary.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, page: u32, size: u32) -> Result<SearchPage, BackendError>;

    async fn suggestions(&self, term: &str) -> Result<Vec<String>, BackendError>;
}
