//! Formatting and fixed-width rendering of query results.
//!
//! `format` holds the three scalar formatters (text truncation, percent
//! rendering, one-digit rendering); `table` picks the right formatter per
//! column and lays rows out in fixed-width left-justified fields.

pub mod format;
pub mod table;

pub use format::{digits_output, percent_output, str_output};
pub use table::{render_rows, REGIONS_FIELD_WIDTH, WIDE_FIELD_WIDTH};
