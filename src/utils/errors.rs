//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::vehicle_state_machine::VehicleRejection;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Rejected(#[from] VehicleRejection),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Body ausente, sin `content-type` JSON o con campos del tipo equivocado
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Ids que no son UUID nunca pueden existir
    #[error("Invalid vehicle id: {0}")]
    InvalidId(#[from] PathRejection),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// Status HTTP de cada rechazo de negocio
fn rejection_status(rejection: &VehicleRejection) -> (StatusCode, &'static str) {
    match rejection {
        VehicleRejection::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid Input"),
        VehicleRejection::InvalidLocation(_) => (StatusCode::CONFLICT, "Invalid Location"),
        VehicleRejection::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
        VehicleRejection::SameLocation => (StatusCode::CONFLICT, "Same Location"),
        VehicleRejection::OutOfFuel => (StatusCode::CONFLICT, "Out Of Fuel"),
        VehicleRejection::NoRoute => (StatusCode::CONFLICT, "No Route"),
        VehicleRejection::TypeMismatch(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Type Mismatch"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Rejected(rejection) => {
                let (status, error) = rejection_status(&rejection);
                (
                    status,
                    ErrorResponse {
                        error: error.to_string(),
                        message: rejection.to_string(),
                        details: None,
                        code: Some(rejection.code().to_string()),
                    },
                )
            }

            AppError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Input".to_string(),
                    message: "The request body is not valid JSON for this endpoint".to_string(),
                    details: Some(json!({ "body_error": rejection.body_text() })),
                    code: Some("INVALID_INPUT".to_string()),
                },
            ),

            AppError::InvalidId(rejection) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: VehicleRejection::NotFound.to_string(),
                    details: Some(json!({ "path_error": rejection.body_text() })),
                    code: Some(VehicleRejection::NotFound.code().to_string()),
                },
            ),

            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_map_to_distinct_codes() {
        let rejections = [
            VehicleRejection::InvalidInput("x".to_string()),
            VehicleRejection::InvalidLocation("Z".to_string()),
            VehicleRejection::NotFound,
            VehicleRejection::SameLocation,
            VehicleRejection::OutOfFuel,
            VehicleRejection::NoRoute,
            VehicleRejection::TypeMismatch("fuel_consumption".to_string()),
        ];

        let mut codes: Vec<&str> = rejections.iter().map(VehicleRejection::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), rejections.len());
    }

    #[test]
    fn test_rejection_status() {
        let response = AppError::from(VehicleRejection::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::from(VehicleRejection::SameLocation).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::from(VehicleRejection::TypeMismatch("f".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
