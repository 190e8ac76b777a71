//! Command parsing: classify tokens and fold them into a query request.
//!
//! Commands are whitespace-delimited and case-insensitive. A single token
//! can mean very different things (a query type, a sort criterion, a
//! `top=N` direction/limit pair, a dimension filter, a join role), so each
//! token is classified independently into a tagged [`Token`] and then
//! folded into a [`QueryRequest`] with every field present and defaulted.
//!
//! Parsing never fails. Unrecognized tokens are dropped, repeated tokens
//! overwrite earlier ones, and a command with no query-type token produces
//! a request with `query: None`, which the query builder turns into an
//! empty result.

use serde::{Deserialize, Serialize};

/// Which of the four entity views a command selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    /// Per-bar rows, no grouping
    Bars,
    /// Group bars by maker company
    Companies,
    /// Group bars by country, joined per the dimension role
    Countries,
    /// Group bars by region, joined per the dimension role
    Regions,
}

/// The aggregation/sort basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Average rating (default)
    #[default]
    Ratings,
    /// Average cocoa fraction
    Cocoa,
    /// Count of bars
    BarsSold,
}

/// Sort direction, spelled `top`/`bottom` in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// `top=N`: largest first (default)
    #[default]
    Descending,
    /// `bottom=N`: smallest first
    Ascending,
}

/// Whether Countries/Regions queries join through the maker-location or
/// the bean-origin country reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DimensionRole {
    /// Join through the maker-location reference (default)
    #[default]
    Sellers,
    /// Join through the bean-origin reference
    Sources,
}

/// The column a dimension-filter key resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKey {
    /// `sellcountry=`: 2-letter code of the maker's country
    SellerCode,
    /// `sourcecountry=`: 2-letter code of the bean-origin country
    OriginCode,
    /// `sellregion=`: region of the maker's country
    SellerRegion,
    /// `sourceregion=`: region of the bean-origin country
    OriginRegion,
    /// `country=`: 2-letter code, joined per the query's dimension role
    CountryCode,
    /// `region=`: region name, joined per the query's dimension role
    Region,
    /// Any other key, taken literally as a column name. Unvalidated here;
    /// the executor rejects names it cannot resolve.
    Raw(String),
}

/// A single dimension restriction, with its value already case-normalized
/// (upper for codes, title for everything else).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Resolved column
    pub key: FilterKey,
    /// Normalized match value
    pub value: String,
}

/// One classified command token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// `bars` / `companies` / `countries` / `regions`
    QueryType(QueryKind),
    /// `cocoa` / `ratings` / `bars_sold`
    Criterion(Metric),
    /// `top=N` / `bottom=N`; the limit stays a raw string until plan time
    DirectionLimit(OrderDirection, String),
    /// `key=value` dimension restriction
    Filter(Filter),
    /// `sellers` / `sources`
    DimensionRole(DimensionRole),
    /// Anything else; silently ignored
    Unrecognized,
}

/// A parsed command with all fields present and defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Selected query kind; `None` means the command named no entity view
    pub query: Option<QueryKind>,
    /// Aggregation/sort metric
    pub metric: Metric,
    /// Sort direction
    pub direction: OrderDirection,
    /// Result-set limit, kept as text until plan time (`"10"` by default)
    pub limit: String,
    /// At most one dimension restriction
    pub filter: Option<Filter>,
    /// Join role for Countries/Regions queries
    pub role: DimensionRole,
}

impl Default for QueryRequest {
    fn default() -> Self {
        QueryRequest {
            query: None,
            metric: Metric::default(),
            direction: OrderDirection::default(),
            limit: "10".to_string(),
            filter: None,
            role: DimensionRole::default(),
        }
    }
}

/// Title-case a value word by word ("south america" -> "South America").
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify one lower-cased token.
pub fn classify(token: &str) -> Token {
    match token {
        "bars" => return Token::QueryType(QueryKind::Bars),
        "companies" => return Token::QueryType(QueryKind::Companies),
        "countries" => return Token::QueryType(QueryKind::Countries),
        "regions" => return Token::QueryType(QueryKind::Regions),
        "ratings" => return Token::Criterion(Metric::Ratings),
        "cocoa" => return Token::Criterion(Metric::Cocoa),
        "bars_sold" => return Token::Criterion(Metric::BarsSold),
        "sellers" => return Token::DimensionRole(DimensionRole::Sellers),
        "sources" => return Token::DimensionRole(DimensionRole::Sources),
        _ => {}
    }

    let parts: Vec<&str> = token.split('=').collect();
    if parts.len() != 2 {
        return Token::Unrecognized;
    }
    let (key, value) = (parts[0], parts[1]);

    match key {
        "top" => Token::DirectionLimit(OrderDirection::Descending, value.to_string()),
        "bottom" => Token::DirectionLimit(OrderDirection::Ascending, value.to_string()),
        "sellcountry" => Token::Filter(Filter {
            key: FilterKey::SellerCode,
            value: value.to_uppercase(),
        }),
        "sourcecountry" => Token::Filter(Filter {
            key: FilterKey::OriginCode,
            value: value.to_uppercase(),
        }),
        "sellregion" => Token::Filter(Filter {
            key: FilterKey::SellerRegion,
            value: title_case(value),
        }),
        "sourceregion" => Token::Filter(Filter {
            key: FilterKey::OriginRegion,
            value: title_case(value),
        }),
        "country" => Token::Filter(Filter {
            key: FilterKey::CountryCode,
            value: value.to_uppercase(),
        }),
        "region" => Token::Filter(Filter {
            key: FilterKey::Region,
            value: title_case(value),
        }),
        // Escape hatch: any other key is taken literally as a column name.
        _ => Token::Filter(Filter {
            key: FilterKey::Raw(key.to_string()),
            value: title_case(value),
        }),
    }
}

/// Parse a free-text command into a request.
///
/// Tokens are classified independently of position; later tokens of the
/// same class overwrite earlier ones.
pub fn parse_command(command: &str) -> QueryRequest {
    let mut request = QueryRequest::default();

    for raw in command.split_whitespace() {
        match classify(&raw.to_lowercase()) {
            Token::QueryType(kind) => request.query = Some(kind),
            Token::Criterion(metric) => request.metric = metric,
            Token::DirectionLimit(direction, limit) => {
                request.direction = direction;
                request.limit = limit;
            }
            Token::Filter(filter) => request.filter = Some(filter),
            Token::DimensionRole(role) => request.role = role,
            Token::Unrecognized => {}
        }
    }

    request
}
