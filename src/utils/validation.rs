//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar los payloads
//! antes de que lleguen a la máquina de estados.

use serde_json::Value;
use validator::ValidationError;

use crate::models::location::MAX_LOCATION_CODE_LEN;
use crate::services::vehicle_state_machine::VehicleRejection;

/// Validar que un código de ubicación no esté vacío ni exceda la columna
pub fn validate_location_code(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 || len > MAX_LOCATION_CODE_LEN {
        let mut error = ValidationError::new("location_code");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &MAX_LOCATION_CODE_LEN);
        return Err(error);
    }
    Ok(())
}

/// Convertir un valor JSON a combustible entero.
///
/// `null` significa "sin cambios". Cualquier otro valor que no sea un
/// entero representable en i32 (string, decimal, booleano) es `TypeMismatch`.
pub fn parse_fuel_value(field: &str, value: &Value) -> Result<Option<i32>, VehicleRejection> {
    let mismatch = || VehicleRejection::TypeMismatch(field.to_string());

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let n = n.as_i64().ok_or_else(mismatch)?;
            i32::try_from(n).map(Some).map_err(|_| mismatch())
        }
        _ => Err(mismatch()),
    }
}
