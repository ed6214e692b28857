//! Modelo de Location
//!
//! Códigos de ubicación internados y el whitelist configurado que los valida.

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Ancho máximo de la columna `current_location` en la base de datos
pub const MAX_LOCATION_CODE_LEN: usize = 3;

/// Código de ubicación canónico (mayúsculas, sin espacios)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Arc<str>);

impl Location {
    /// Envuelve un código leído de la base de datos sin pasar por el whitelist
    pub(crate) fn from_persisted(code: impl Into<Arc<str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Normaliza un código crudo a su forma canónica
pub fn canonical_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LocationSetError {
    #[error("location whitelist is empty")]
    Empty,

    #[error("location code '{0}' is empty or longer than the column allows")]
    InvalidCode(String),

    #[error("location code '{0}' is duplicated")]
    Duplicate(String),
}

/// Conjunto cerrado de ubicaciones válidas
#[derive(Debug, Clone)]
pub struct LocationSet {
    codes: HashSet<Location>,
}

impl LocationSet {
    pub fn new<I, S>(codes: I) -> Result<Self, LocationSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for raw in codes {
            let code = canonical_code(raw.as_ref());
            if code.is_empty() || code.chars().count() > MAX_LOCATION_CODE_LEN {
                return Err(LocationSetError::InvalidCode(raw.as_ref().to_string()));
            }
            if !set.insert(Location(Arc::from(code.as_str()))) {
                return Err(LocationSetError::Duplicate(code));
            }
        }

        if set.is_empty() {
            return Err(LocationSetError::Empty);
        }

        Ok(Self { codes: set })
    }

    /// Parsea una lista separada por comas, p.ej. `"A,B,C"`
    pub fn parse(list: &str) -> Result<Self, LocationSetError> {
        Self::new(list.split(',').filter(|s| !s.trim().is_empty()))
    }

    /// Devuelve la instancia internada si el código (sin distinguir mayúsculas) está permitido
    pub fn resolve(&self, raw: &str) -> Option<Location> {
        let code = canonical_code(raw);
        self.codes.get(code.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Códigos ordenados, útil para logs y mensajes de error
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.codes.iter().map(Location::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for LocationSet {
    fn default() -> Self {
        let codes = ["A", "B", "C"]
            .into_iter()
            .map(|c| Location(Arc::from(c)))
            .collect();
        Self { codes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let set = LocationSet::default();

        assert_eq!(set.resolve("a").map(|l| l.to_string()), Some("A".to_string()));
        assert_eq!(set.resolve(" b ").map(|l| l.to_string()), Some("B".to_string()));
        assert!(set.resolve("Z").is_none());
        assert!(set.resolve("").is_none());
    }

    #[test]
    fn test_resolve_returns_interned_instance() {
        let set = LocationSet::default();
        let first = set.resolve("c").unwrap();
        let second = set.resolve("C").unwrap();

        assert!(Arc::ptr_eq(&first.0, &second.0));
    }

    #[test]
    fn test_set_size_is_not_bounded_to_three() {
        let set = LocationSet::parse("A,B,C,D,HUB").unwrap();

        assert_eq!(set.len(), 5);
        assert_eq!(set.codes(), vec!["A", "B", "C", "D", "HUB"]);
        assert!(set.resolve("hub").is_some());
    }

    #[test]
    fn test_invalid_whitelists_are_rejected() {
        assert_eq!(LocationSet::parse("").unwrap_err(), LocationSetError::Empty);
        assert_eq!(
            LocationSet::parse("A,a").unwrap_err(),
            LocationSetError::Duplicate("A".to_string())
        );
        assert_eq!(
            LocationSet::parse("A,TOOLONG").unwrap_err(),
            LocationSetError::InvalidCode("TOOLONG".to_string())
        );
    }
}
