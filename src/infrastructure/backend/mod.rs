//! Search backend access

mod client;
mod traits;

pub use client::HttpSearchBackend;
pub use traits::SearchBackend;
