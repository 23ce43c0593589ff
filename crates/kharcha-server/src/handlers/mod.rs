//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod advisor;
pub mod expenses;
pub mod health;
pub mod receipts;

// Re-export all handlers for use in router
pub use advisor::*;
pub use expenses::*;
pub use health::*;
pub use receipts::*;
