//! In-memory session storage

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::QueryStore;
use crate::domain::{GatewayError, GatewayResult, SearchSession};

/// Process-local session store
///
/// Sessions live as long as the process, matching the per-tab lifetime of
/// the search box state they hold.
pub struct InMemoryQueryStore {
    sessions: DashMap<Uuid, SearchSession>,
}

impl InMemoryQueryStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemoryQueryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryStore for InMemoryQueryStore {
    async fn create(&self) -> GatewayResult<SearchSession> {
        let session = SearchSession::new();
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: Uuid) -> GatewayResult<Option<SearchSession>> {
        Ok(self.sessions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set_query(&self, id: Uuid, query: String) -> GatewayResult<SearchSession> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| GatewayError::session_not_found(id))?;
        entry.set_query(query);
        Ok(entry.clone())
    }

    async fn remove(&self, id: Uuid) -> GatewayResult<()> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::session_not_found(id))
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}
