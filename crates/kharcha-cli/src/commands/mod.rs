//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/status commands and shared utilities (open_db)
//! - `expenses` - Expense commands (add, list, delete)
//! - `reports` - Spending summary
//! - `scan` - Receipt-text extraction
//! - `ask` - Advisor queries
//! - `serve` - Web server command

pub mod ask;
pub mod core;
pub mod expenses;
pub mod reports;
pub mod scan;
pub mod serve;

// Re-export command functions for main.rs
pub use ask::*;
pub use core::*;
pub use expenses::*;
pub use reports::*;
pub use scan::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
