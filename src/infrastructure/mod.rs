//! Infrastructure layer - external concerns

pub mod backend;
pub mod storage;

pub use backend::{HttpSearchBackend, SearchBackend};
pub use storage::{InMemoryQueryStore, QueryStore};
