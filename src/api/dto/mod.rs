//! API data transfer objects

pub mod common;
pub mod search;
pub mod session;

pub use common::*;
pub use search::*;
pub use session::*;
