//! Modelos del sistema
//!
//! Este módulo contiene el agregado Vehicle y los códigos de ubicación.

pub mod location;
pub mod vehicle;

pub use location::{Location, LocationSet};
pub use vehicle::{NewVehicle, Vehicle};
