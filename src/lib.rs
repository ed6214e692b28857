//! Servicio de seguimiento de flota
//!
//! Vehículos con ubicación, combustible y distancia recorrida, movidos
//! según una tabla fija de rutas y expuestos vía API HTTP.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
