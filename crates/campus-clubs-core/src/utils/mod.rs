//! Utility functions for display formatting.

pub mod format;

pub use format::{format_amount, format_datetime, format_optional, truncate_string};
