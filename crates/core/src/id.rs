//! Strongly-typed identifiers used across the catalog.
//!
//! Identifiers are authored slugs (`knowledge-base-rag`, `complete`,
//! `upsell-dashboard`): lowercase ASCII letters, digits and single hyphens.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a sellable feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureId(String);

/// Identifier of a pricing tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TierId(String);

/// Identifier of an offer (any kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OfferId(String);

/// Identifier of any catalog entry (tier, offer, support or coaching tier).
///
/// Upgrade paths and journeys point across entity kinds, so they carry this
/// untyped form and are resolved against the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

/// Returns true when `s` is a well-formed slug.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

macro_rules! impl_slug_newtype {
    ($t:ident, $name:literal) => {
        impl $t {
            /// Parse and validate a slug.
            pub fn parse(s: &str) -> Result<Self, CatalogError> {
                s.parse()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl FromStr for $t {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_slug(s) {
                    Ok(Self(s.to_owned()))
                } else {
                    Err(CatalogError::invalid_id(format!("{}: {:?}", $name, s)))
                }
            }
        }

        impl TryFrom<String> for $t {
            type Error = CatalogError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if is_slug(&value) {
                    Ok(Self(value))
                } else {
                    Err(CatalogError::invalid_id(format!("{}: {:?}", $name, value)))
                }
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl From<$t> for EntityId {
            fn from(value: $t) -> Self {
                EntityId(value.0)
            }
        }

        impl From<&$t> for EntityId {
            fn from(value: &$t) -> Self {
                EntityId(value.0.clone())
            }
        }
    };
}

impl_slug_newtype!(FeatureId, "FeatureId");
impl_slug_newtype!(TierId, "TierId");
impl_slug_newtype!(OfferId, "OfferId");

impl EntityId {
    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for EntityId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_slug(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(CatalogError::invalid_id(format!("EntityId: {s:?}")))
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_slug(&value) {
            Ok(Self(value))
        } else {
            Err(CatalogError::invalid_id(format!("EntityId: {value:?}")))
        }
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}
