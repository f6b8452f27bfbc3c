use serde::{Deserialize, Serialize};

/// One paint option. The first entry of a model's list is its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleColor {
    pub hex: String,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub overall_length: String,
    pub overall_width: String,
    pub overall_height: String,
    pub wheelbase: String,
    pub unladen_ground_clearance: String,
    pub luggage_capacity: String,
    pub turning_radius: String,
    pub curb_weight: String,
    pub seating_capacity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Powertrain {
    pub technology: String,
    pub drivetrain: String,
    pub front_motor_type: String,
    pub front_motor_power: String,
    pub front_motor_torque: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Performance {
    pub acceleration: String,
    pub ev_driving_range: String,
    pub battery_type: String,
    pub battery_capacity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Chassis {
    pub front_suspension: String,
    pub rear_suspension: String,
    pub front_brake: String,
    pub rear_brake: String,
    pub wheel_type: String,
    pub tire_size: String,
}

/// Catalog record for a single vehicle model.
///
/// `price` is kept as the display string (symbol plus grouped digits); use
/// [`crate::util::currency::parse_price`] before comparing it numerically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleModel {
    pub id: String,
    pub name: String,
    pub price: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub image: String,
    pub colors: Vec<VehicleColor>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub powertrain: Powertrain,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub chassis: Chassis,
}

impl VehicleModel {
    pub fn powertrain_technology(&self) -> &str {
        &self.powertrain.technology
    }

    /// Default paint, present for every validated catalog record.
    pub fn default_color(&self) -> Option<&VehicleColor> {
        self.colors.first()
    }

    pub fn find_color(&self, hex: &str) -> Option<&VehicleColor> {
        self.colors.iter().find(|color| color.hex == hex)
    }
}

/// Powertrain facet values in display order.
pub const POWERTRAIN_OPTIONS: [&str; 3] = ["Full Electric", "DM-i", "DMO"];

/// Vehicle-type facet values in display order.
pub const VEHICLE_TYPE_OPTIONS: [&str; 9] = [
    "Compact Sedan",
    "Compact SUV",
    "Performance SUV",
    "Executive Sedan",
    "Midsize Performance Sedan",
    "Mini Hatchback",
    "Hatchback",
    "Pickup Truck",
    "MPV",
];
