use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::location::Location;
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

/// Frontera de persistencia del agregado Vehicle
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;

    async fn list(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Escribe ubicación, combustible, distancia, consumo y ubicación previa
    /// en una sola operación. `None` si el vehículo ya no existe.
    async fn save_state(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, AppError>;

    /// `true` si se eliminó una fila
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

// Fila tal como vive en PostgreSQL
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    current_location: String,
    fuel_capacity_remaining: i32,
    distance_traveled: Decimal,
    fuel_consumed_last_move: i32,
    previous_location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            current_location: Location::from_persisted(row.current_location),
            fuel_capacity_remaining: row.fuel_capacity_remaining,
            distance_traveled: row.distance_traveled,
            fuel_consumed_last_move: row.fuel_consumed_last_move,
            previous_location: row.previous_location.map(Location::from_persisted),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (id, current_location, fuel_capacity_remaining, distance_traveled,
                                  fuel_consumed_last_move, previous_location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.current_location.as_str())
        .bind(vehicle.fuel_capacity_remaining)
        .bind(vehicle.distance_traveled)
        .bind(vehicle.fuel_consumed_last_move)
        .bind(vehicle.previous_location.as_ref().map(Location::as_str))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn save_state(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET current_location = $2, fuel_capacity_remaining = $3, distance_traveled = $4,
                fuel_consumed_last_move = $5, previous_location = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(vehicle.id)
        .bind(vehicle.current_location.as_str())
        .bind(vehicle.fuel_capacity_remaining)
        .bind(vehicle.distance_traveled)
        .bind(vehicle.fuel_consumed_last_move)
        .bind(vehicle.previous_location.as_ref().map(Location::as_str))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
