//! Features marketplace module.
//!
//! Separately sellable features, the category and text filters over them, and the
//! bundle calculator. Pure domain logic (no IO).

pub mod bundle;
pub mod feature;
pub mod filter;

pub use bundle::{Bundle, BundleTotals, MissingDependency};
pub use feature::{Dependency, DependencyKind, Feature, FeatureCategory, MarketComparison};
pub use filter::{MarketplaceFilter, by_category, group_by_category, search};
