pub mod pagination;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use pagination::{
    page_window, parse_page, PageWindow, PaginationRequest, PaginationToken,
    DEFAULT_VISIBLE_BUTTONS, MAX_VISIBLE_BUTTONS, MIN_VISIBLE_BUTTONS,
};
pub use search::{SearchHit, SearchPage, SearchQuery, SuggestionList};
pub use session::SearchSession;

pub use crate::shared::errors::{BackendError, GatewayError};

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
