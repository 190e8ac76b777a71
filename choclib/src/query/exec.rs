//! Plan execution against the in-memory store.
//!
//! Each of the four query kinds has its own join topology and grouping
//! rule:
//!
//! - **Bars**: no grouping; filters may join a country through either
//!   reference; ordered by the per-bar metric column.
//! - **Companies**: grouped by company name; no join needed for grouping,
//!   filters join per their key.
//! - **Countries**: grouped by the role-joined country's English name;
//!   bars without that reference drop out.
//! - **Regions**: grouped by the role-joined country's region; dimension
//!   filters are not applied.
//!
//! Grouped queries only report groups with more than
//! [`MIN_GROUP_SIZE`](crate::query::plan::MIN_GROUP_SIZE) bars. Ties in
//! the ordering metric fall back to store order, which is a property of
//! the load, not of the query semantics.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::command::{DimensionRole, Filter, FilterKey, Metric, OrderDirection, QueryKind};
use crate::data::model::{Bar, Country, Store};
use crate::error::ChocError;
use crate::query::plan::{QueryPlan, MIN_GROUP_SIZE};
use crate::Result;

/// One row of a Bars query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    /// Specific bar name
    pub specific_bean_bar_name: String,
    /// Maker company
    pub company: String,
    /// Maker location, free text
    pub company_location: String,
    /// Rating
    pub rating: f64,
    /// Cocoa fraction
    pub cocoa_percent: f64,
    /// Bean origin, free text
    pub broad_bean_origin: String,
}

/// The aggregate computed for one group.
///
/// The variant records which metric produced the value so the renderer can
/// pick the matching formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggValue {
    /// Average rating
    Rating(f64),
    /// Average cocoa fraction
    Cocoa(f64),
    /// Number of bars
    Count(u64),
}

impl AggValue {
    /// Numeric key used for ordering.
    pub fn sort_key(&self) -> f64 {
        match self {
            AggValue::Rating(v) | AggValue::Cocoa(v) => *v,
            AggValue::Count(n) => *n as f64,
        }
    }
}

/// One row of a Companies/Countries/Regions query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    /// Group label: company name, country name, or region name
    pub label: String,
    /// Aggregated metric value
    pub value: AggValue,
}

/// One result row of any query kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultRow {
    /// Row of a Bars query
    Bar(BarRow),
    /// Row of a grouped query
    Group(GroupRow),
}

/// Run a fully-bound plan against the store.
///
/// The only error is [`ChocError::UnknownColumn`], produced when a raw
/// escape-hatch filter names a column that does not exist. Callers treat
/// that as "no results for this command".
pub fn execute(store: &Store, plan: &QueryPlan) -> Result<Vec<ResultRow>> {
    match plan.kind {
        QueryKind::Bars => run_bars(store, plan),
        QueryKind::Companies => run_companies(store, plan),
        QueryKind::Countries => run_countries(store, plan),
        QueryKind::Regions => run_regions(store, plan),
    }
}

/// The country a filter or grouping joins through, per the dimension role.
fn role_join<'a>(store: &'a Store, bar: &Bar, role: DimensionRole) -> Option<&'a Country> {
    match role {
        DimensionRole::Sellers => store.seller(bar),
        DimensionRole::Sources => store.origin(bar),
    }
}

/// Match a raw escape-hatch filter against the known text columns of the
/// bar and of its role-joined country. Anything else is an unknown column.
fn raw_column_matches(
    store: &Store,
    bar: &Bar,
    role: DimensionRole,
    column: &str,
    value: &str,
) -> Result<bool> {
    match column {
        "company" => Ok(bar.company == value),
        "specificbeanbarname" => Ok(bar.specific_bean_bar_name == value),
        "ref" => Ok(bar.ref_code == value),
        "reviewdate" => Ok(bar.review_date == value),
        "companylocation" => Ok(bar.company_location == value),
        "beantype" => Ok(bar.bean_type == value),
        "broadbeanorigin" => Ok(bar.broad_bean_origin == value),
        "alpha2" => Ok(role_join(store, bar, role).is_some_and(|c| c.alpha2 == value)),
        "alpha3" => Ok(role_join(store, bar, role).is_some_and(|c| c.alpha3 == value)),
        "englishname" => Ok(role_join(store, bar, role).is_some_and(|c| c.english_name == value)),
        "region" => Ok(role_join(store, bar, role).is_some_and(|c| c.region == value)),
        "subregion" => Ok(role_join(store, bar, role).is_some_and(|c| c.subregion == value)),
        _ => Err(ChocError::UnknownColumn(column.to_string())),
    }
}

/// Evaluate one dimension restriction against one bar.
///
/// Bars with an unresolved country reference never match a filter that
/// needs the corresponding join.
fn bar_matches(store: &Store, bar: &Bar, filter: &Filter, role: DimensionRole) -> Result<bool> {
    let value = filter.value.as_str();
    match &filter.key {
        FilterKey::SellerCode => Ok(store.seller(bar).is_some_and(|c| c.alpha2 == value)),
        FilterKey::OriginCode => Ok(store.origin(bar).is_some_and(|c| c.alpha2 == value)),
        FilterKey::SellerRegion => Ok(store.seller(bar).is_some_and(|c| c.region == value)),
        FilterKey::OriginRegion => Ok(store.origin(bar).is_some_and(|c| c.region == value)),
        FilterKey::CountryCode => Ok(role_join(store, bar, role).is_some_and(|c| c.alpha2 == value)),
        FilterKey::Region => Ok(role_join(store, bar, role).is_some_and(|c| c.region == value)),
        FilterKey::Raw(column) => raw_column_matches(store, bar, role, column, value),
    }
}

/// Apply the plan's filter (when `honor_filter` is set) and collect the
/// surviving bars in store order.
fn select_bars<'a>(store: &'a Store, plan: &QueryPlan, honor_filter: bool) -> Result<Vec<&'a Bar>> {
    let mut selected = Vec::new();
    for bar in &store.bars {
        let keep = match (&plan.filter, honor_filter) {
            (Some(filter), true) => bar_matches(store, bar, filter, plan.role)?,
            _ => true,
        };
        if keep {
            selected.push(bar);
        }
    }
    Ok(selected)
}

/// Stable sort by key, reverse for descending, truncate to the limit.
/// The stable sort is what makes ties fall back to store order.
fn order_and_limit<T, F>(mut rows: Vec<T>, key: F, direction: OrderDirection, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    if direction == OrderDirection::Descending {
        rows.reverse();
    }
    rows.truncate(limit);
    rows
}

/// Group bars by label, preserving first-seen (store) order of groups.
/// Bars with no label (unresolved join) are skipped.
fn group_bars<'a, F>(bars: Vec<&'a Bar>, label_of: F) -> Vec<(String, Vec<&'a Bar>)>
where
    F: Fn(&Bar) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&Bar>)> = Vec::new();
    for bar in bars {
        if let Some(label) = label_of(bar) {
            match index.get(&label) {
                Some(&slot) => groups[slot].1.push(bar),
                None => {
                    index.insert(label.clone(), groups.len());
                    groups.push((label, vec![bar]));
                }
            }
        }
    }
    groups
}

/// Aggregate one group under the plan's metric.
fn aggregate(bars: &[&Bar], metric: Metric) -> AggValue {
    match metric {
        Metric::Ratings => {
            let sum: f64 = bars.iter().map(|b| b.rating).sum();
            AggValue::Rating(sum / bars.len() as f64)
        }
        Metric::Cocoa => {
            let sum: f64 = bars.iter().map(|b| b.cocoa_percent).sum();
            AggValue::Cocoa(sum / bars.len() as f64)
        }
        Metric::BarsSold => AggValue::Count(bars.len() as u64),
    }
}

/// Shared tail of the three grouped kinds: drop small groups, aggregate,
/// order and limit.
fn finish_groups(
    groups: Vec<(String, Vec<&Bar>)>,
    plan: &QueryPlan,
) -> Vec<ResultRow> {
    let rows: Vec<GroupRow> = groups
        .into_iter()
        .filter(|(_, bars)| bars.len() > MIN_GROUP_SIZE)
        .map(|(label, bars)| GroupRow {
            value: aggregate(&bars, plan.metric),
            label,
        })
        .collect();

    order_and_limit(rows, |row| row.value.sort_key(), plan.direction, plan.limit)
        .into_iter()
        .map(ResultRow::Group)
        .collect()
}

fn run_bars(store: &Store, plan: &QueryPlan) -> Result<Vec<ResultRow>> {
    let bars = select_bars(store, plan, true)?;

    // bars_sold has no per-bar column; it degrades to rating order
    let key = |bar: &&Bar| match plan.metric {
        Metric::Cocoa => bar.cocoa_percent,
        Metric::Ratings | Metric::BarsSold => bar.rating,
    };

    Ok(order_and_limit(bars, key, plan.direction, plan.limit)
        .into_iter()
        .map(|bar| {
            ResultRow::Bar(BarRow {
                specific_bean_bar_name: bar.specific_bean_bar_name.clone(),
                company: bar.company.clone(),
                company_location: bar.company_location.clone(),
                rating: bar.rating,
                cocoa_percent: bar.cocoa_percent,
                broad_bean_origin: bar.broad_bean_origin.clone(),
            })
        })
        .collect())
}

fn run_companies(store: &Store, plan: &QueryPlan) -> Result<Vec<ResultRow>> {
    let bars = select_bars(store, plan, true)?;
    let groups = group_bars(bars, |bar| Some(bar.company.clone()));
    Ok(finish_groups(groups, plan))
}

fn run_countries(store: &Store, plan: &QueryPlan) -> Result<Vec<ResultRow>> {
    let bars = select_bars(store, plan, true)?;
    let groups = group_bars(bars, |bar| {
        role_join(store, bar, plan.role).map(|c| c.english_name.clone())
    });
    Ok(finish_groups(groups, plan))
}

fn run_regions(store: &Store, plan: &QueryPlan) -> Result<Vec<ResultRow>> {
    // Regions take no dimension filter
    let bars = select_bars(store, plan, false)?;
    let groups = group_bars(bars, |bar| {
        role_join(store, bar, plan.role).map(|c| c.region.clone())
    });
    Ok(finish_groups(groups, plan))
}
