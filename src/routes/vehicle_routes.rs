use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, MoveVehicleRequest, UpdateFuelRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath};
use uuid::Uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", patch(update_fuel))
        .route("/:id", delete(delete_vehicle))
        .route("/location/:id", patch(move_vehicle))
}

/// Ruta legacy del servicio original: `DELETE /car/:id`
pub fn create_legacy_router() -> Router<AppState> {
    Router::new().route("/car/:id", delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn move_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<MoveVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.move_to(id, request).await?;
    Ok(Json(response))
}

async fn update_fuel(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateFuelRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update_fuel(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle was successfully deleted".to_string())))
}
