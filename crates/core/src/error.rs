//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Only loading and validating authored data can fail. Filters, searches and
/// bundle totals are total functions and never return this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A value failed validation (e.g. a payment schedule that does not add up).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Two entries of the same kind share an identifier.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// An entry references an identifier that does not exist.
    #[error("{kind} `{from}` references unknown id `{to}`")]
    DanglingReference {
        kind: &'static str,
        from: String,
        to: String,
    },

    /// An identifier was malformed (empty, whitespace, uppercase).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested entry was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An embedded data document could not be decoded.
    #[error("failed to parse {document}: {message}")]
    Parse { document: &'static str, message: String },
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    pub fn dangling(kind: &'static str, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::DanglingReference {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn parse(document: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            document,
            message: message.into(),
        }
    }
}
