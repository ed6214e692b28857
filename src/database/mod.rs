//! Módulo de base de datos
//!
//! Maneja la conexión y el schema en PostgreSQL

pub mod connection;

pub use connection::{DatabaseConnection, DatabaseError};
