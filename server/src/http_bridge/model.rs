use serde::{Deserialize, Serialize};
use showroomcore::catalog::{VehicleModel, POWERTRAIN_OPTIONS, VEHICLE_TYPE_OPTIONS};
use showroomcore::prelude::PriceRange;

/// Listing request body. `min`/`max` are raw input text, not numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListingQuery {
    pub search: String,
    pub powertrains: Vec<String>,
    pub vehicle_types: Vec<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPayload {
    pub results: Vec<VehicleModel>,
    pub result_count: usize,
    pub total_count: usize,
    pub price_range: Option<PriceRange>,
    pub dataset_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorQuery {
    pub hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorPayload {
    pub hex: String,
    pub name: String,
    pub image: String,
    pub is_light: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetOptions {
    pub powertrains: Vec<String>,
    pub vehicle_types: Vec<String>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self {
            powertrains: POWERTRAIN_OPTIONS.iter().map(|s| s.to_string()).collect(),
            vehicle_types: VEHICLE_TYPE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
