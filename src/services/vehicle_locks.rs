//! Locks por vehículo
//!
//! Serializa las secuencias leer-modificar-escribir sobre un mismo id.
//! Vehículos distintos nunca compiten por el mismo lock.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct VehicleLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl VehicleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Espera el lock exclusivo del vehículo `id`
    pub async fn acquire(&self, id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entradas que nadie sostiene ni espera
            locks.retain(|key, lock| *key == id || Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Número de entradas activas en el mapa
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
