//! Storage trait definitions

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{GatewayResult, SearchSession};

/// Persistence for per-client search sessions
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Open a new session with an empty query.
    async fn create(&self) -> GatewayResult<SearchSession>;
    async fn get(&self, id: Uuid) -> GatewayResult<Option<SearchSession>>;
    /// Replace the session query; fails with `NotFound` for unknown ids.
    async fn set_query(&self, id: Uuid, query: String) -> GatewayResult<SearchSession>;
    async fn remove(&self, id: Uuid) -> GatewayResult<()>;
    async fn count(&self) -> usize;
}
