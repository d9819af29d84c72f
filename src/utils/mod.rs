//! Utility modules for the combobox.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_count, format_result_count};
