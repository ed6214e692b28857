//! Repositorios
//!
//! Acceso a datos del agregado Vehicle: PostgreSQL vía sqlx o memoria.

pub mod memory_vehicle_repository;
pub mod vehicle_repository;

pub use memory_vehicle_repository::MemoryVehicleRepository;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
