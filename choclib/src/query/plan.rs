//! Binding a parsed request into an executable plan.
//!
//! The plan is a plain value object: entity kind, metric, direction,
//! numeric limit, optional filter, join role. Binding is where the two
//! lenient limit rules land: a non-numeric limit falls back to the
//! default of 10, and a missing query kind means there is no plan at all
//! (the caller renders an empty result).

use serde::{Deserialize, Serialize};

use crate::command::{DimensionRole, Filter, Metric, OrderDirection, QueryKind, QueryRequest};

/// Result-set limit used when a command gives none, or gives one that
/// does not parse as a number.
pub const DEFAULT_LIMIT: usize = 10;

/// Grouped queries only report groups with more than this many bars.
pub const MIN_GROUP_SIZE: usize = 4;

/// A fully-bound aggregation query, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Entity view
    pub kind: QueryKind,
    /// Aggregation/sort metric
    pub metric: Metric,
    /// Sort direction
    pub direction: OrderDirection,
    /// Maximum number of result rows; 0 yields no rows
    pub limit: usize,
    /// Optional dimension restriction (ignored by Regions queries)
    pub filter: Option<Filter>,
    /// Join role for Countries/Regions grouping and for `country=`/`region=`
    /// filters
    pub role: DimensionRole,
}

impl QueryPlan {
    /// Bind a request into a plan.
    ///
    /// Returns `None` when the command named no query kind; that is the
    /// "no result" path, not an error.
    pub fn from_request(request: &QueryRequest) -> Option<QueryPlan> {
        let kind = request.query?;
        let limit = request.limit.parse().unwrap_or(DEFAULT_LIMIT);

        Some(QueryPlan {
            kind,
            metric: request.metric,
            direction: request.direction,
            limit,
            filter: request.filter.clone(),
            role: request.role,
        })
    }
}
