//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, extractores
//! y validación.

pub mod errors;
pub mod extract;
pub mod validation;
