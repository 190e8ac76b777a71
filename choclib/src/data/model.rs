//! Core row types and the in-memory store.
//!
//! [`Bar`] and [`Country`] are plain rows; [`Store`] owns both tables and
//! the resolved country references. Reference resolution happens once, in
//! [`Store::new`], and the store is never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One reviewed chocolate bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Maker company name
    pub company: String,
    /// Specific bar name
    pub specific_bean_bar_name: String,
    /// Internal reference code
    pub ref_code: String,
    /// Review date
    pub review_date: String,
    /// Cocoa content as a fraction in [0, 1]
    pub cocoa_percent: f64,
    /// Maker's country, free text
    pub company_location: String,
    /// Resolved maker country, if the location text matched a country name
    pub company_location_id: Option<usize>,
    /// Quality rating, typically 1-5 in 0.25 steps
    pub rating: f64,
    /// Bean type, free text, may be empty
    pub bean_type: String,
    /// Bean origin, free text
    pub broad_bean_origin: String,
    /// Resolved origin country, if the origin text matched a country name
    pub broad_bean_origin_id: Option<usize>,
}

/// One country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO-style 2-letter code, canonical uppercase
    #[serde(rename = "alpha2Code")]
    pub alpha2: String,
    /// ISO-style 3-letter code
    #[serde(rename = "alpha3Code")]
    pub alpha3: String,
    /// Canonical English name
    #[serde(rename = "name")]
    pub english_name: String,
    /// Region name
    pub region: String,
    /// Subregion name
    pub subregion: String,
    /// Population
    pub population: u64,
    /// Area, may be absent
    pub area: Option<f64>,
}

/// The read-only two-table store.
///
/// Country references on bars are indexes into `countries`, filled in by
/// `Store::new`. A bar whose location/origin text matched no country name
/// keeps a `None` reference and drops out of any query that needs the
/// corresponding join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// All bar rows, in load order
    pub bars: Vec<Bar>,
    /// All country rows, in load order
    pub countries: Vec<Country>,
}

impl Store {
    /// Build a store and resolve country references on every bar.
    ///
    /// Resolution matches the bar's free-text location/origin against
    /// `Country::english_name` exactly. It runs exactly once here; the
    /// store is read-only afterwards.
    pub fn new(bars: Vec<Bar>, countries: Vec<Country>) -> Self {
        let mut store = Store { bars, countries };
        store.resolve_references();
        store
    }

    fn resolve_references(&mut self) {
        let by_name: HashMap<&str, usize> = self
            .countries
            .iter()
            .enumerate()
            .map(|(id, c)| (c.english_name.as_str(), id))
            .collect();

        for bar in &mut self.bars {
            bar.company_location_id = by_name.get(bar.company_location.as_str()).copied();
            bar.broad_bean_origin_id = by_name.get(bar.broad_bean_origin.as_str()).copied();
        }
    }

    /// The country a bar's maker sells from, if resolved.
    pub fn seller(&self, bar: &Bar) -> Option<&Country> {
        bar.company_location_id.and_then(|id| self.countries.get(id))
    }

    /// The country a bar's beans came from, if resolved.
    pub fn origin(&self, bar: &Bar) -> Option<&Country> {
        bar.broad_bean_origin_id.and_then(|id| self.countries.get(id))
    }
}
