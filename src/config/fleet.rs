//! Configuración de la flota
//!
//! Whitelist de ubicaciones, tabla de rutas, combustible inicial y política
//! de combustible. Se construye una vez al arrancar y se inyecta en la
//! máquina de estados.

use std::sync::Arc;

use super::environment::{optional_var, parsed_var, ConfigError};
use crate::models::location::LocationSet;
use crate::services::route_rules::RouteRuleTable;
use crate::services::vehicle_state_machine::{FuelPolicy, VehicleStateMachine, DEFAULT_FUEL_CAPACITY};

#[derive(Debug, Clone)]
pub struct FleetConfig {
    pub locations: Arc<LocationSet>,
    pub routes: Arc<RouteRuleTable>,
    pub default_fuel_capacity: i32,
    pub fuel_policy: FuelPolicy,
}

impl FleetConfig {
    /// Configuración del servicio original: `{A, B, C}` y su tabla
    pub fn reference() -> Result<Self, ConfigError> {
        let locations = LocationSet::default();
        let routes = RouteRuleTable::default_for(&locations)?;

        Ok(Self {
            locations: Arc::new(locations),
            routes: Arc::new(routes),
            default_fuel_capacity: DEFAULT_FUEL_CAPACITY,
            fuel_policy: FuelPolicy::default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let locations = match optional_var("FLEET_LOCATIONS") {
            Some(list) => LocationSet::parse(&list)?,
            None => LocationSet::default(),
        };
        let routes = match optional_var("FLEET_ROUTES") {
            Some(spec) => RouteRuleTable::parse(&locations, &spec)?,
            None => RouteRuleTable::default_for(&locations)?,
        };

        Ok(Self {
            locations: Arc::new(locations),
            routes: Arc::new(routes),
            default_fuel_capacity: parsed_var("FLEET_DEFAULT_FUEL", DEFAULT_FUEL_CAPACITY)?,
            fuel_policy: parsed_var("FLEET_FUEL_POLICY", FuelPolicy::default())?,
        })
    }

    pub fn state_machine(&self) -> VehicleStateMachine {
        VehicleStateMachine::new(self.locations.clone(), self.routes.clone())
            .with_default_fuel_capacity(self.default_fuel_capacity)
            .with_fuel_policy(self.fuel_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_configuration() {
        let config = FleetConfig::reference().unwrap();

        assert_eq!(config.locations.codes(), vec!["A", "B", "C"]);
        assert_eq!(config.routes.len(), 9);
        assert_eq!(config.default_fuel_capacity, 10);
        assert_eq!(config.fuel_policy, FuelPolicy::PreMove);
    }

    #[test]
    fn test_state_machine_uses_configured_defaults() {
        let mut config = FleetConfig::reference().unwrap();
        config.default_fuel_capacity = 42;

        let vehicle = config.state_machine().new_vehicle("b").unwrap();
        assert_eq!(vehicle.fuel_capacity_remaining, 42);
    }
}
