//! Bulk loading of the bars CSV and countries JSON files.
//!
//! Both files are read once at startup. Cocoa percentages arrive as text
//! ("70%") and are converted to fractions here, so every query downstream
//! only ever sees a value in [0, 1]. Country references are resolved by
//! [`Store::new`] immediately after both tables are in memory.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::model::{Bar, Country, Store};
use crate::error::ChocError;
use crate::Result;

/// One row of the bars CSV, column names as they appear in the header.
#[derive(Debug, Deserialize)]
struct BarRecord {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "SpecificBeanBarName")]
    specific_bean_bar_name: String,
    #[serde(rename = "REF")]
    ref_code: String,
    #[serde(rename = "ReviewDate")]
    review_date: String,
    #[serde(rename = "CocoaPercent")]
    cocoa_percent: String,
    #[serde(rename = "CompanyLocation")]
    company_location: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "BeanType")]
    bean_type: String,
    #[serde(rename = "BroadBeanOrigin")]
    broad_bean_origin: String,
}

/// Convert a "70%" style cell into a fraction in [0, 1].
fn parse_cocoa_fraction(cell: &str) -> Result<f64> {
    let digits = cell.trim().trim_end_matches('%');
    let percent: f64 = digits
        .parse()
        .map_err(|_| ChocError::InvalidCocoaPercent(cell.to_string()))?;
    Ok(percent / 100.0)
}

/// The source dataset marks a missing bean type with a lone non-breaking
/// space; collapse that (and plain whitespace) to an empty string.
fn normalize_bean_type(cell: &str) -> String {
    let trimmed = cell.trim().trim_matches('\u{a0}');
    trimmed.to_string()
}

/// Load bar rows from a CSV file.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ChocError::DataFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut bars = Vec::new();
    for record in reader.deserialize() {
        let record: BarRecord = record?;
        bars.push(Bar {
            company: record.company,
            specific_bean_bar_name: record.specific_bean_bar_name,
            ref_code: record.ref_code,
            review_date: record.review_date,
            cocoa_percent: parse_cocoa_fraction(&record.cocoa_percent)?,
            company_location: record.company_location,
            company_location_id: None,
            rating: record.rating,
            bean_type: normalize_bean_type(&record.bean_type),
            broad_bean_origin: record.broad_bean_origin,
            broad_bean_origin_id: None,
        });
    }
    Ok(bars)
}

/// Load country rows from a JSON file.
///
/// 2-letter codes are upper-cased on the way in so that code filters can
/// compare against a canonical form.
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<Country>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ChocError::DataFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut countries: Vec<Country> = serde_json::from_str(&text)?;
    for country in &mut countries {
        country.alpha2 = country.alpha2.to_uppercase();
    }
    Ok(countries)
}

/// Load both tables and build the store with resolved country references.
pub fn load_store(bars_path: impl AsRef<Path>, countries_path: impl AsRef<Path>) -> Result<Store> {
    let bars = load_bars(bars_path)?;
    let countries = load_countries(countries_path)?;
    Ok(Store::new(bars, countries))
}
