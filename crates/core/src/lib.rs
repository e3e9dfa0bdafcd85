//! `sao-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the feature, tier and
//! offer crates: identifiers, money, pricing and the error model. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod pricing;
pub mod text;

pub use entity::{Categorized, Entity, count_by, filter_by, filter_by_opt};
pub use error::{CatalogError, CatalogResult};
pub use id::{EntityId, FeatureId, OfferId, TierId};
pub use money::{Currency, Money};
pub use pricing::{Pricing, VolumeTier};
pub use text::{MIN_QUERY_CHARS, normalize_query};
