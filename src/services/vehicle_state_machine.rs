//! Máquina de estados del vehículo
//!
//! Única autoridad que valida y aplica cambios de ubicación y combustible.
//! Todas las operaciones son puras: reciben `&Vehicle` y devuelven un
//! vehículo nuevo, así un rechazo nunca deja una mutación parcial.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::models::location::{canonical_code, LocationSet};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::services::route_rules::RouteRuleTable;

/// Combustible inicial del servicio original
pub const DEFAULT_FUEL_CAPACITY: i32 = 10;

/// Motivos de rechazo visibles para el cliente
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VehicleRejection {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Location not exist: {0}")]
    InvalidLocation(String),

    #[error("Vehicle not found")]
    NotFound,

    #[error("Same location")]
    SameLocation,

    #[error("It's out of gas, it needs to recharge")]
    OutOfFuel,

    #[error("Not route")]
    NoRoute,

    #[error("{0} must be an integer")]
    TypeMismatch(String),
}

impl VehicleRejection {
    /// Código estable para el cliente
    pub fn code(&self) -> &'static str {
        match self {
            VehicleRejection::InvalidInput(_) => "INVALID_INPUT",
            VehicleRejection::InvalidLocation(_) => "INVALID_LOCATION",
            VehicleRejection::NotFound => "NOT_FOUND",
            VehicleRejection::SameLocation => "SAME_LOCATION",
            VehicleRejection::OutOfFuel => "OUT_OF_FUEL",
            VehicleRejection::NoRoute => "NO_ROUTE",
            VehicleRejection::TypeMismatch(_) => "TYPE_MISMATCH",
        }
    }
}

/// Cuándo se considera que un vehículo no tiene combustible para moverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelPolicy {
    /// Solo se mira el combustible antes del movimiento (`<= 0`); el costo
    /// puede dejar el saldo en negativo
    #[default]
    PreMove,
    /// Además rechaza si el saldo proyectado tras el movimiento sería negativo
    Projected,
}

impl FromStr for FuelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre-move" | "pre_move" | "premove" => Ok(FuelPolicy::PreMove),
            "projected" => Ok(FuelPolicy::Projected),
            other => Err(format!("unknown fuel policy '{}'", other)),
        }
    }
}

/// Reglas de transición compartidas por todos los vehículos
#[derive(Debug, Clone)]
pub struct VehicleStateMachine {
    locations: Arc<LocationSet>,
    routes: Arc<RouteRuleTable>,
    default_fuel_capacity: i32,
    fuel_policy: FuelPolicy,
}

impl VehicleStateMachine {
    pub fn new(locations: Arc<LocationSet>, routes: Arc<RouteRuleTable>) -> Self {
        Self {
            locations,
            routes,
            default_fuel_capacity: DEFAULT_FUEL_CAPACITY,
            fuel_policy: FuelPolicy::default(),
        }
    }

    pub fn with_default_fuel_capacity(mut self, fuel: i32) -> Self {
        self.default_fuel_capacity = fuel;
        self
    }

    pub fn with_fuel_policy(mut self, policy: FuelPolicy) -> Self {
        self.fuel_policy = policy;
        self
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn routes(&self) -> &RouteRuleTable {
        &self.routes
    }

    pub fn fuel_policy(&self) -> FuelPolicy {
        self.fuel_policy
    }

    /// Estado inicial de un vehículo creado en `location`
    pub fn new_vehicle(&self, location: &str) -> Result<NewVehicle, VehicleRejection> {
        let current_location = self
            .locations
            .resolve(location)
            .ok_or_else(|| VehicleRejection::InvalidLocation(location.to_string()))?;

        Ok(NewVehicle {
            current_location,
            fuel_capacity_remaining: self.default_fuel_capacity,
            distance_traveled: Decimal::ZERO,
            fuel_consumed_last_move: 0,
            previous_location: None,
        })
    }

    /// Valida y aplica un movimiento hacia `destination`.
    ///
    /// El orden de las comprobaciones es parte del contrato:
    /// entrada vacía, misma ubicación, sin combustible, sin ruta.
    pub fn request_move(
        &self,
        vehicle: &Vehicle,
        destination: &str,
    ) -> Result<Vehicle, VehicleRejection> {
        let code = canonical_code(destination);
        if code.is_empty() {
            return Err(VehicleRejection::InvalidInput(
                "destination is required".to_string(),
            ));
        }

        if code == vehicle.current_location.as_str() {
            return Err(VehicleRejection::SameLocation);
        }

        if vehicle.fuel_capacity_remaining <= 0 {
            return Err(VehicleRejection::OutOfFuel);
        }

        // Un destino fuera del whitelist no puede tener ruta
        let target = self
            .locations
            .resolve(&code)
            .ok_or(VehicleRejection::NoRoute)?;
        let cost = self
            .routes
            .lookup(&vehicle.current_location, &target)
            .ok_or(VehicleRejection::NoRoute)?;

        let remaining = vehicle.fuel_capacity_remaining.saturating_sub(cost);
        if self.fuel_policy == FuelPolicy::Projected && remaining < 0 {
            return Err(VehicleRejection::OutOfFuel);
        }

        let mut moved = vehicle.clone();
        moved.distance_traveled += Decimal::from(cost);
        moved.fuel_capacity_remaining = remaining;
        moved.fuel_consumed_last_move = cost;
        moved.previous_location = Some(vehicle.current_location.clone());
        moved.current_location = target;

        Ok(moved)
    }

    /// Sobrescribe el combustible restante sin validar límites
    pub fn update_fuel_capacity(&self, vehicle: &Vehicle, fuel: i32) -> Vehicle {
        let mut updated = vehicle.clone();
        updated.fuel_capacity_remaining = fuel;
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::Location;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn machine() -> VehicleStateMachine {
        let locations = LocationSet::default();
        let routes = RouteRuleTable::default_for(&locations).unwrap();
        VehicleStateMachine::new(Arc::new(locations), Arc::new(routes))
    }

    fn vehicle_at(machine: &VehicleStateMachine, code: &str, fuel: i32) -> Vehicle {
        let mut vehicle = machine
            .new_vehicle(code)
            .unwrap()
            .into_vehicle(Uuid::new_v4(), Utc::now());
        vehicle.fuel_capacity_remaining = fuel;
        vehicle
    }

    #[test]
    fn test_new_vehicle_defaults() {
        let machine = machine();
        let vehicle = machine.new_vehicle("a").unwrap();

        assert_eq!(vehicle.current_location.as_str(), "A");
        assert_eq!(vehicle.fuel_capacity_remaining, DEFAULT_FUEL_CAPACITY);
        assert_eq!(vehicle.distance_traveled, Decimal::ZERO);
        assert_eq!(vehicle.fuel_consumed_last_move, 0);
        assert!(vehicle.previous_location.is_none());
    }

    #[test]
    fn test_new_vehicle_rejects_unknown_location() {
        let machine = machine();

        assert_eq!(
            machine.new_vehicle("Z").unwrap_err(),
            VehicleRejection::InvalidLocation("Z".to_string())
        );
    }

    #[test]
    fn test_round_trip_scenario() {
        let machine = machine();
        let start = vehicle_at(&machine, "A", 10);

        let at_b = machine.request_move(&start, "B").unwrap();
        assert_eq!(at_b.current_location.as_str(), "B");
        assert_eq!(at_b.fuel_capacity_remaining, 9);
        assert_eq!(at_b.distance_traveled, Decimal::from(1));
        assert_eq!(at_b.fuel_consumed_last_move, 1);
        assert_eq!(at_b.previous_location.as_ref().map(Location::as_str), Some("A"));

        let back = machine.request_move(&at_b, "a").unwrap();
        assert_eq!(back.current_location.as_str(), "A");
        assert_eq!(back.fuel_capacity_remaining, 8);
        assert_eq!(back.distance_traveled, Decimal::from(2));
        assert_eq!(back.fuel_consumed_last_move, 1);
        assert_eq!(back.previous_location.as_ref().map(Location::as_str), Some("B"));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let machine = machine();
        let empty_tank = vehicle_at(&machine, "A", 0);

        // Entrada vacía gana sobre todo lo demás
        assert!(matches!(
            machine.request_move(&empty_tank, "  "),
            Err(VehicleRejection::InvalidInput(_))
        ));
        // Misma ubicación gana sobre falta de combustible
        assert_eq!(
            machine.request_move(&empty_tank, "a").unwrap_err(),
            VehicleRejection::SameLocation
        );
        // Falta de combustible gana sobre destino desconocido
        assert_eq!(
            machine.request_move(&empty_tank, "Z").unwrap_err(),
            VehicleRejection::OutOfFuel
        );
    }

    #[test]
    fn test_out_of_fuel_even_for_zero_cost_route() {
        let locations = LocationSet::default();
        let routes = RouteRuleTable::parse(&locations, "A-B:0").unwrap();
        let machine = VehicleStateMachine::new(Arc::new(locations), Arc::new(routes));
        let vehicle = vehicle_at(&machine, "A", 0);

        assert_eq!(
            machine.request_move(&vehicle, "B").unwrap_err(),
            VehicleRejection::OutOfFuel
        );
    }

    #[test]
    fn test_pre_move_policy_allows_negative_fuel() {
        let machine = machine();
        let vehicle = vehicle_at(&machine, "B", 1);

        let moved = machine.request_move(&vehicle, "C").unwrap();
        assert_eq!(moved.fuel_capacity_remaining, -3);
        assert_eq!(moved.fuel_consumed_last_move, 4);
    }

    #[test]
    fn test_projected_policy_rejects_overdraw() {
        let machine = machine().with_fuel_policy(FuelPolicy::Projected);
        let vehicle = vehicle_at(&machine, "B", 1);

        assert_eq!(
            machine.request_move(&vehicle, "C").unwrap_err(),
            VehicleRejection::OutOfFuel
        );
        assert!(machine.request_move(&vehicle, "A").is_ok());
    }

    #[test]
    fn test_missing_route_is_rejected() {
        let locations = LocationSet::default();
        let routes = RouteRuleTable::parse(&locations, "A-B:1").unwrap();
        let machine = VehicleStateMachine::new(Arc::new(locations), Arc::new(routes));
        let vehicle = vehicle_at(&machine, "B", 10);

        assert_eq!(
            machine.request_move(&vehicle, "A").unwrap_err(),
            VehicleRejection::NoRoute
        );
    }

    #[test]
    fn test_update_fuel_capacity_overwrites_exactly() {
        let machine = machine();
        let vehicle = vehicle_at(&machine, "A", 10);

        assert_eq!(machine.update_fuel_capacity(&vehicle, 25).fuel_capacity_remaining, 25);
        assert_eq!(machine.update_fuel_capacity(&vehicle, -5).fuel_capacity_remaining, -5);
        assert_eq!(vehicle.fuel_capacity_remaining, 10);
    }

    #[test]
    fn test_fuel_policy_from_str() {
        assert_eq!("pre-move".parse::<FuelPolicy>(), Ok(FuelPolicy::PreMove));
        assert_eq!("Projected".parse::<FuelPolicy>(), Ok(FuelPolicy::Projected));
        assert!("strict".parse::<FuelPolicy>().is_err());
    }

    fn arbitrary_code() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("A"), Just("B"), Just("C"), Just("D"), Just("Z")]
    }

    proptest! {
        #[test]
        fn move_applies_table_cost_or_leaves_vehicle_untouched(
            origin in prop_oneof![Just("A"), Just("B"), Just("C")],
            destination in arbitrary_code(),
            fuel in 1..50i32,
        ) {
            let machine = machine();
            let vehicle = vehicle_at(&machine, origin, fuel);
            let before = vehicle.clone();

            match machine.request_move(&vehicle, destination) {
                Ok(moved) => {
                    let target = machine.locations().resolve(destination).unwrap();
                    let cost = machine.routes().lookup(&vehicle.current_location, &target).unwrap();
                    prop_assert_eq!(moved.distance_traveled, vehicle.distance_traveled + Decimal::from(cost));
                    prop_assert_eq!(moved.fuel_capacity_remaining, vehicle.fuel_capacity_remaining - cost);
                    prop_assert_eq!(moved.fuel_consumed_last_move, cost);
                    prop_assert_eq!(moved.previous_location, Some(vehicle.current_location.clone()));
                    prop_assert_eq!(moved.current_location, target);
                }
                Err(rejection) => {
                    let expected = if origin == destination {
                        VehicleRejection::SameLocation
                    } else {
                        VehicleRejection::NoRoute
                    };
                    prop_assert_eq!(rejection, expected);
                }
            }
            prop_assert_eq!(vehicle, before);
        }

        #[test]
        fn same_location_wins_regardless_of_fuel(
            origin in prop_oneof![Just("A"), Just("B"), Just("C")],
            fuel in -20..20i32,
        ) {
            let machine = machine();
            let vehicle = vehicle_at(&machine, origin, fuel);

            prop_assert_eq!(
                machine.request_move(&vehicle, &origin.to_lowercase()),
                Err(VehicleRejection::SameLocation)
            );
        }

        #[test]
        fn distance_never_decreases(
            hops in proptest::collection::vec(arbitrary_code(), 1..20),
        ) {
            let machine = machine();
            let mut vehicle = vehicle_at(&machine, "A", 100);

            for hop in hops {
                if let Ok(moved) = machine.request_move(&vehicle, hop) {
                    prop_assert!(moved.distance_traveled >= vehicle.distance_traveled);
                    vehicle = moved;
                }
            }
        }
    }
}
