use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

/// Repositorio en memoria, usado en tests y cuando no hay `DATABASE_URL`
#[derive(Clone, Default)]
pub struct MemoryVehicleRepository {
    vehicles: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
}

impl MemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for MemoryVehicleRepository {
    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let vehicle = vehicle.into_vehicle(Uuid::new_v4(), Utc::now());
        self.vehicles
            .write()
            .await
            .insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles: Vec<Vehicle> = self.vehicles.read().await.values().cloned().collect();
        vehicles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }

    async fn save_state(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, AppError> {
        let mut vehicles = self.vehicles.write().await;
        let Some(stored) = vehicles.get_mut(&vehicle.id) else {
            return Ok(None);
        };

        stored.current_location = vehicle.current_location.clone();
        stored.fuel_capacity_remaining = vehicle.fuel_capacity_remaining;
        stored.distance_traveled = vehicle.distance_traveled;
        stored.fuel_consumed_last_move = vehicle.fuel_consumed_last_move;
        stored.previous_location = vehicle.previous_location.clone();
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.vehicles.write().await.remove(&id).is_some())
    }
}
