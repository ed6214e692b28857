//! Services module
//!
//! Este módulo contiene la lógica de negocio: la tabla de rutas, la máquina
//! de estados del vehículo y la serialización por vehículo.

pub mod route_rules;
pub mod vehicle_locks;
pub mod vehicle_state_machine;

pub use route_rules::RouteRuleTable;
pub use vehicle_locks::VehicleLocks;
pub use vehicle_state_machine::{FuelPolicy, VehicleRejection, VehicleStateMachine};
