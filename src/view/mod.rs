//! Render models for the results page
//!
//! Plain data shaped for a template or a client-side renderer; no markup is
//! produced here.

pub mod pagination;
pub mod results;

pub use pagination::{page_href, PageLink, PaginationItem, PaginationView, ELLIPSIS_GLYPH};
pub use results::{ResultCard, FALLBACK_FAVICON};
