//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (file loading, date parsing, JSON output)
//! - `budget` - Budget status command
//! - `forecast` - Seven-day forecast command
//! - `reports` - Patterns, summary, yearly and projection reports

pub mod budget;
pub mod core;
pub mod forecast;
pub mod reports;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use forecast::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
