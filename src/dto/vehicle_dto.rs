use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::models::location::Location;
use crate::models::vehicle::Vehicle;
use crate::utils::validation::validate_location_code;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(required, custom = "validate_location_code")]
    pub location: Option<String>,
}

// Request para mover un vehículo (el servicio original usaba `location`)
#[derive(Debug, Deserialize)]
pub struct MoveVehicleRequest {
    #[serde(alias = "location")]
    pub destination: Option<String>,
}

// Request para sobrescribir el combustible; el tipo se valida en el controller
#[derive(Debug, Deserialize)]
pub struct UpdateFuelRequest {
    #[serde(default)]
    pub fuel_consumption: Value,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub current_location: Location,
    pub fuel_capacity_remaining: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_traveled: Decimal,
    pub fuel_consumed_last_move: i32,
    pub previous_location: Option<Location>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            current_location: vehicle.current_location,
            fuel_capacity_remaining: vehicle.fuel_capacity_remaining,
            distance_traveled: vehicle.distance_traveled,
            fuel_consumed_last_move: vehicle.fuel_consumed_last_move,
            previous_location: vehicle.previous_location,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
