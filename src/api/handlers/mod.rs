//! API request handlers

pub mod health;
pub mod metrics;
pub mod pagination;
pub mod proxy;
pub mod search;
pub mod sessions;
