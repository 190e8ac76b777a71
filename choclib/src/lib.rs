//! # choclib
//!
//! A query library for a small two-table chocolate bar review dataset.
//!
//! ## Overview
//!
//! choclib compiles short, loosely-typed command strings like
//! `"companies cocoa top=5 sellregion=europe"` into one of four structured
//! aggregation queries (bars, companies, countries, regions), runs them
//! against an in-memory read-only store, and renders the results as
//! fixed-width lines.
//!
//! The pipeline has five stages:
//!
//! 1. **Command Parser**: tokenizes a command into a [`QueryRequest`]
//! 2. **Query Builder**: binds the request into a [`QueryPlan`]
//! 3. **Query Executor**: evaluates the plan against the [`Store`]
//! 4. **Formatter**: converts scalar values into display tokens
//! 5. **Renderer**: lays formatted values out in fixed-width columns
//!
//! ## Example
//!
//! ```rust
//! use choclib::{execute, parse_command, render_rows, QueryPlan, Store};
//!
//! let store = Store::new(vec![], vec![]);
//! let request = parse_command("companies cocoa top=5");
//! if let Some(plan) = QueryPlan::from_request(&request) {
//!     let rows = execute(&store, &plan).unwrap();
//!     for line in render_rows(&plan, &rows) {
//!         println!("{}", line);
//!     }
//! }
//! ```
//!
//! Parsing never fails: unrecognized tokens are ignored and missing pieces
//! fall back to defaults (ratings metric, descending direction, limit 10).
//! The only runtime error surface is the executor, which rejects unresolvable
//! raw-column filters with [`ChocError::UnknownColumn`].

pub mod command;
pub mod data;
pub mod error;
pub mod output;
pub mod query;

pub use command::{
    parse_command, DimensionRole, Filter, FilterKey, Metric, OrderDirection, QueryKind,
    QueryRequest, Token,
};
pub use data::{load_bars, load_countries, load_store, Bar, Country, Store};
pub use error::ChocError;
pub use output::{digits_output, percent_output, render_rows, str_output};
pub use query::{execute, AggValue, BarRow, GroupRow, QueryPlan, ResultRow};

/// Result type for choclib operations
pub type Result<T> = std::result::Result<T, ChocError>;
