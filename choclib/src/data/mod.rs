//! Data model and bulk loading for the two-table dataset.
//!
//! The dataset has one table of chocolate bar reviews and one table of
//! countries. Bars carry two free-text country columns (maker location and
//! bean origin); after bulk load each is resolved to a country index by
//! exact match on the country's English name. The store is read-only once
//! resolution has run.

pub mod load;
pub mod model;

pub use load::{load_bars, load_countries, load_store};
pub use model::{Bar, Country, Store};
