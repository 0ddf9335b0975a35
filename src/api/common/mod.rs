//! Shared extractors for API handlers

mod validated;

pub use validated::{ValidatedJson, ValidatedQuery, ValidationRejection};
