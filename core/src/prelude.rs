use serde::{Deserialize, Serialize};

use crate::catalog::VehicleModel;

/// Inclusive price window used by the listing filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Failure to load or validate catalog data.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("reading catalog source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("model {0} has no colors")]
    NoColors(String),
    #[error("duplicate model id {0}")]
    DuplicateId(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A price string that cannot be turned into a number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("no digits in price {0:?}")]
    NoDigits(String),
    #[error("price {0:?} does not fit in 64 bits")]
    Overflow(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
}

/// Anything that can hand over the full list of vehicle records.
///
/// The store calls `fetch_models` at most once per lifetime, so an
/// implementation is free to do blocking I/O here.
pub trait CatalogSource: Send + Sync {
    fn fetch_models(&self) -> CatalogResult<Vec<VehicleModel>>;

    /// Human-readable origin used in log lines.
    fn describe(&self) -> String;
}
