//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::models::location::LocationSetError;
use crate::services::route_rules::RouteTableError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("FLEET_LOCATIONS: {0}")]
    Locations(#[from] LocationSetError),

    #[error("FLEET_ROUTES: {0}")]
    Routes(#[from] RouteTableError),
}

/// Leer una variable opcional (vacía cuenta como ausente)
pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Leer y parsear una variable con valor por defecto
pub(crate) fn parsed_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: optional_var("HOST").unwrap_or(defaults.host),
            port: parsed_var("PORT", defaults.port)?,
            cors_origins: optional_var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();

        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_parsed_var_reports_bad_value() {
        std::env::set_var("FLEET_TRACKER_TEST_PORT", "not-a-port");
        let result: Result<u16, _> = parsed_var("FLEET_TRACKER_TEST_PORT", 3000);
        std::env::remove_var("FLEET_TRACKER_TEST_PORT");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "FLEET_TRACKER_TEST_PORT", .. })
        ));
    }

    #[test]
    fn test_parsed_var_uses_default_when_missing() {
        let port: u16 = parsed_var("FLEET_TRACKER_TEST_MISSING", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
