//! Tabla de reglas de ruta
//!
//! Mapea pares ordenados (origen, destino) a un costo entero no negativo,
//! que es a la vez combustible consumido y distancia recorrida.
//! Se construye una vez al arrancar y se comparte en solo lectura.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::location::{Location, LocationSet};

/// Tabla del servicio original: ruta simétrica entre A, B y C
const DEFAULT_RULES: &[(&str, &str, i32)] = &[
    ("A", "A", 0),
    ("A", "B", 1),
    ("B", "A", 1),
    ("A", "C", 2),
    ("C", "A", 2),
    ("B", "B", 0),
    ("B", "C", 4),
    ("C", "B", 4),
    ("C", "C", 0),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route {origin}->{destination} references unknown location '{location}'")]
    UnknownLocation {
        origin: String,
        destination: String,
        location: String,
    },

    #[error("route {origin}->{destination} has negative cost {cost}")]
    NegativeCost {
        origin: String,
        destination: String,
        cost: i32,
    },

    #[error("route {origin}->{destination} is defined twice")]
    Duplicate { origin: String, destination: String },

    #[error("malformed route entry '{0}' (expected ORIGIN-DEST:COST)")]
    Malformed(String),
}

/// Tabla inmutable de costos por par ordenado
#[derive(Debug, Clone)]
pub struct RouteRuleTable {
    rules: HashMap<(Location, Location), i32>,
}

impl RouteRuleTable {
    /// Construye la tabla validando cada extremo contra el whitelist.
    /// Cada dirección es una entrada independiente; no se asume simetría.
    pub fn new<'a, I>(locations: &LocationSet, entries: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, i32)>,
    {
        let mut rules = HashMap::new();

        for (origin, destination, cost) in entries {
            let resolve = |code: &str| {
                locations
                    .resolve(code)
                    .ok_or_else(|| RouteTableError::UnknownLocation {
                        origin: origin.to_string(),
                        destination: destination.to_string(),
                        location: code.to_string(),
                    })
            };
            let from = resolve(origin)?;
            let to = resolve(destination)?;

            if cost < 0 {
                return Err(RouteTableError::NegativeCost {
                    origin: from.to_string(),
                    destination: to.to_string(),
                    cost,
                });
            }

            if rules.insert((from.clone(), to.clone()), cost).is_some() {
                return Err(RouteTableError::Duplicate {
                    origin: from.to_string(),
                    destination: to.to_string(),
                });
            }
        }

        Ok(Self { rules })
    }

    /// Tabla por defecto sobre `{A, B, C}`
    pub fn default_for(locations: &LocationSet) -> Result<Self, RouteTableError> {
        Self::new(locations, DEFAULT_RULES.iter().copied())
    }

    /// Parsea entradas `ORIGIN-DEST:COST` separadas por comas, p.ej. `A-B:1,B-A:1`
    pub fn parse(locations: &LocationSet, spec: &str) -> Result<Self, RouteTableError> {
        let mut entries = Vec::new();

        for raw in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let malformed = || RouteTableError::Malformed(raw.to_string());
            let (pair, cost) = raw.split_once(':').ok_or_else(malformed)?;
            let (origin, destination) = pair.split_once('-').ok_or_else(malformed)?;
            let cost: i32 = cost.trim().parse().map_err(|_| malformed())?;
            entries.push((origin.trim(), destination.trim(), cost));
        }

        Self::new(locations, entries)
    }

    /// Costo del movimiento directo, `None` si no existe la ruta
    pub fn lookup(&self, origin: &Location, destination: &Location) -> Option<i32> {
        self.rules
            .get(&(origin.clone(), destination.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(set: &LocationSet, code: &str) -> Location {
        set.resolve(code).unwrap()
    }

    #[test]
    fn test_default_table_matches_reference_costs() {
        let set = LocationSet::default();
        let table = RouteRuleTable::default_for(&set).unwrap();

        assert_eq!(table.len(), 9);
        assert_eq!(table.lookup(&loc(&set, "A"), &loc(&set, "B")), Some(1));
        assert_eq!(table.lookup(&loc(&set, "C"), &loc(&set, "A")), Some(2));
        assert_eq!(table.lookup(&loc(&set, "B"), &loc(&set, "C")), Some(4));
        assert_eq!(table.lookup(&loc(&set, "B"), &loc(&set, "B")), Some(0));
    }

    #[test]
    fn test_pairs_are_directional() {
        let set = LocationSet::default();
        let table = RouteRuleTable::parse(&set, "A-B:1, B-A:7").unwrap();

        assert_eq!(table.lookup(&loc(&set, "A"), &loc(&set, "B")), Some(1));
        assert_eq!(table.lookup(&loc(&set, "B"), &loc(&set, "A")), Some(7));
        assert_eq!(table.lookup(&loc(&set, "A"), &loc(&set, "C")), None);
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        let set = LocationSet::default();

        assert_eq!(
            RouteRuleTable::parse(&set, "AB1").unwrap_err(),
            RouteTableError::Malformed("AB1".to_string())
        );
        assert!(matches!(
            RouteRuleTable::parse(&set, "A-Z:1").unwrap_err(),
            RouteTableError::UnknownLocation { location, .. } if location == "Z"
        ));
        assert!(matches!(
            RouteRuleTable::parse(&set, "A-B:-3").unwrap_err(),
            RouteTableError::NegativeCost { cost: -3, .. }
        ));
        assert!(matches!(
            RouteRuleTable::parse(&set, "A-B:1,a-b:2").unwrap_err(),
            RouteTableError::Duplicate { .. }
        ));
    }
}
