//! `sao-catalog`: the authored catalog and everything derived from it.
//!
//! The catalog is a set of JSON documents compiled into the binary and validated on
//! load. Everything past loading is a total function over immutable data: filters,
//! search, summaries and the presentation lookup tables.

pub mod catalog;
pub mod presentation;
pub mod price_range;
pub mod search;
pub mod summary;
mod validate;

pub use catalog::{COMPARABLE_TIERS, Catalog, CatalogDocuments};
pub use price_range::{PRICE_PRESETS, PricePreset, PriceRange};
pub use search::{ResultKind, SearchConfig, SearchIndex, SearchResult, SearchWidget, WidgetState};
pub use summary::{MaxRecurring, OfferCounts, Summary};
pub use validate::CreditWarning;
