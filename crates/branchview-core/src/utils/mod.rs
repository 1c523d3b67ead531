//! Utility functions for string matching, ordering and formatting.

pub mod collate;
pub mod format;

// Re-export commonly used functions at module level
pub use collate::compare_nb;
pub use format::{contains_ignore_case, format_date, format_phone, truncate_string};
