//! Query building and execution.
//!
//! A [`QueryPlan`] is the fully-bound description of one of the four
//! aggregation queries, built from a parsed [`QueryRequest`](crate::QueryRequest).
//! [`execute`] evaluates a plan against the read-only store:
//! filter, then group, aggregate and restrict (for the grouped kinds),
//! then sort and limit.

pub mod exec;
pub mod plan;

pub use exec::{execute, AggValue, BarRow, GroupRow, ResultRow};
pub use plan::{QueryPlan, DEFAULT_LIMIT, MIN_GROUP_SIZE};
