//! Storage traits and implementations

mod memory;
mod traits;

pub use memory::InMemoryQueryStore;
pub use traits::QueryStore;
