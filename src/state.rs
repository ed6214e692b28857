//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::VehicleRepository;
use crate::services::vehicle_locks::VehicleLocks;
use crate::services::vehicle_state_machine::VehicleStateMachine;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repository: Arc<dyn VehicleRepository>,
    pub state_machine: Arc<VehicleStateMachine>,
    pub vehicle_locks: VehicleLocks,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        repository: Arc<dyn VehicleRepository>,
        state_machine: VehicleStateMachine,
    ) -> Self {
        Self {
            config,
            repository,
            state_machine: Arc::new(state_machine),
            vehicle_locks: VehicleLocks::new(),
        }
    }
}
