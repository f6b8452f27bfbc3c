pub mod blog;
pub mod store;
pub mod vehicle;

pub use blog::{BlogFeed, BlogPost};
pub use store::{dataset_price_range, CatalogStore, EmbeddedCatalog, JsonFileCatalog};
pub use vehicle::{
    Chassis, Dimensions, Performance, Powertrain, VehicleColor, VehicleModel, POWERTRAIN_OPTIONS,
    VEHICLE_TYPE_OPTIONS,
};
