//! Export functionality for analysis
//!
//! Learning curves and value tables are written as CSV so that plotting and
//! further analysis can happen in external tools.

mod rewards_csv;

pub use rewards_csv::{ValueRecord, export_learning_curve, export_value_table};
