//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::environment::{optional_var, parsed_var, ConfigError};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// `None` si no hay `DATABASE_URL`: el servicio usa el repositorio en memoria
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(url) = optional_var("DATABASE_URL") else {
            return Ok(None);
        };

        let mut config = Self::new(url);
        config.max_connections = parsed_var("DATABASE_MAX_CONNECTIONS", config.max_connections)?;
        config.min_connections = config.min_connections.min(config.max_connections);
        Ok(Some(config))
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}
