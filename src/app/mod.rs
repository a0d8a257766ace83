//! Reporting for the CLI.
//!
//! This module renders the final report and derives the process exit status.

pub mod exit_code;
pub mod statistics;

// Re-export public API
pub use exit_code::evaluate_exit_code;
pub use statistics::{print_report, render_listing_table, summary_lines};
