//! Application layer - use cases on top of the backend and session store

pub mod services;

pub use services::{SearchService, SearchView, SuggestOutcome, SuggestionService};
