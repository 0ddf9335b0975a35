//! Application services

pub mod search;
pub mod suggestions;

pub use search::{SearchService, SearchView};
pub use suggestions::{SuggestOutcome, SuggestionService};
