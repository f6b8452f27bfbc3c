//! Catalog and listing core for the EV showroom.
//!
//! The catalog store hands out immutable vehicle records; the listing module
//! turns user input into a filtered, order-preserving view of them and tracks
//! which page sections have been revealed.

pub mod catalog;
pub mod listing;
pub mod prelude;
pub mod telemetry;
pub mod util;

pub use catalog::{CatalogStore, VehicleModel};
pub use listing::{Facet, ListingController, PresentationState};
pub use prelude::{CatalogError, CatalogResult, CatalogSource, PriceRange};
