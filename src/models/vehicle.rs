//! Modelo de Vehicle
//!
//! Este módulo contiene el agregado Vehicle y los datos de creación.
//! Mapea a la tabla `vehicles` (ver `migrations/0001_create_vehicles.sql`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::location::Location;

/// Vehicle principal, siempre "estacionado" en `current_location`
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub current_location: Location,
    pub fuel_capacity_remaining: i32,
    pub distance_traveled: Decimal,
    pub fuel_consumed_last_move: i32,
    pub previous_location: Option<Location>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estado inicial de un vehículo antes de persistirlo (sin id ni timestamps)
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub current_location: Location,
    pub fuel_capacity_remaining: i32,
    pub distance_traveled: Decimal,
    pub fuel_consumed_last_move: i32,
    pub previous_location: Option<Location>,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: Uuid, now: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            current_location: self.current_location,
            fuel_capacity_remaining: self.fuel_capacity_remaining,
            distance_traveled: self.distance_traveled,
            fuel_consumed_last_move: self.fuel_consumed_last_move,
            previous_location: self.previous_location,
            created_at: now,
            updated_at: now,
        }
    }
}
