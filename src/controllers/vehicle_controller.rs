use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, MoveVehicleRequest, UpdateFuelRequest, VehicleResponse,
};
use crate::repositories::VehicleRepository;
use crate::services::vehicle_locks::VehicleLocks;
use crate::services::vehicle_state_machine::{VehicleRejection, VehicleStateMachine};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::parse_fuel_value;

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    state_machine: Arc<VehicleStateMachine>,
    locks: VehicleLocks,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
            state_machine: state.state_machine.clone(),
            locks: state.vehicle_locks.clone(),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let Some(location) = request.location.as_deref() else {
            return Err(VehicleRejection::InvalidInput("location is required".to_string()).into());
        };
        request.validate().map_err(|_| VehicleRejection::InvalidLocation(location.to_string()))?;

        let new_vehicle = self.state_machine.new_vehicle(location)?;
        let vehicle = self.repository.insert(new_vehicle).await?;
        info!("🚗 Vehículo {} creado en {}", vehicle.id, vehicle.current_location);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(VehicleRejection::NotFound)?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn move_to(
        &self,
        id: Uuid,
        request: MoveVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let _guard = self.locks.acquire(id).await;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(VehicleRejection::NotFound)?;

        let destination = request.destination.unwrap_or_default();
        let moved = match self.state_machine.request_move(&vehicle, &destination) {
            Ok(moved) => moved,
            Err(rejection) => {
                debug!("Movimiento de {} rechazado: {}", id, rejection.code());
                return Err(rejection.into());
            }
        };

        let saved = self
            .repository
            .save_state(&moved)
            .await?
            .ok_or(VehicleRejection::NotFound)?;
        info!(
            "📍 Vehículo {} movido {} -> {} (combustible restante {})",
            id, vehicle.current_location, saved.current_location, saved.fuel_capacity_remaining
        );

        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Location updated".to_string(),
        ))
    }

    pub async fn update_fuel(
        &self,
        id: Uuid,
        request: UpdateFuelRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let _guard = self.locks.acquire(id).await;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(VehicleRejection::NotFound)?;

        let Some(fuel) = parse_fuel_value("fuel_consumption", &request.fuel_consumption)? else {
            return Ok(ApiResponse::success(vehicle.into()));
        };

        let updated = self.state_machine.update_fuel_capacity(&vehicle, fuel);
        let saved = self
            .repository
            .save_state(&updated)
            .await?
            .ok_or(VehicleRejection::NotFound)?;
        info!("⛽ Combustible del vehículo {} fijado en {}", id, fuel);

        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Fuel capacity updated".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let _guard = self.locks.acquire(id).await;

        if !self.repository.delete(id).await? {
            return Err(VehicleRejection::NotFound.into());
        }
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}
