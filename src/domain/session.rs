//! Search session entity
//!
//! The query typed into the search box, held per client session instead of in
//! process-wide state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-client search state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchSession {
    /// Идентификатор сессии
    pub id: Uuid,
    /// Текущий запрос в строке поиска
    pub query: String,
    /// Время последнего изменения
    pub updated_at: DateTime<Utc>,
}

impl SearchSession {
    /// A fresh session starts with an empty query.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            query: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.updated_at = Utc::now();
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
