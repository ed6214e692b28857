use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use fleet_tracker::config::{DatabaseConfig, EnvironmentConfig, FleetConfig};
use fleet_tracker::database::DatabaseConnection;
use fleet_tracker::repositories::{MemoryVehicleRepository, PgVehicleRepository, VehicleRepository};
use fleet_tracker::routes::create_app_router;
use fleet_tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🚚 Fleet Tracker - API de vehículos");
    info!("==================================");

    let env_config = EnvironmentConfig::from_env()?;
    let fleet_config = FleetConfig::from_env()?;
    info!(
        "🗺️ Ubicaciones: {:?} | rutas: {} | combustible inicial: {} | política: {:?}",
        fleet_config.locations.codes(),
        fleet_config.routes.len(),
        fleet_config.default_fuel_capacity,
        fleet_config.fuel_policy
    );

    // Inicializar persistencia
    let repository: Arc<dyn VehicleRepository> = match DatabaseConfig::from_env()? {
        Some(db_config) => {
            let connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            info!("✅ PostgreSQL conectado exitosamente");
            Arc::new(PgVehicleRepository::new(connection.pool().clone()))
        }
        None => {
            warn!("⚠️ DATABASE_URL no definido, usando repositorio en memoria");
            Arc::new(MemoryVehicleRepository::new())
        }
    };

    let addr: SocketAddr = env_config.server_url().parse()?;
    let app_state = AppState::new(env_config, repository, fleet_config.state_machine());
    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   POST   /api/car - Crear vehículo");
    info!("   GET    /api/car - Listar vehículos");
    info!("   GET    /api/car/:id - Obtener vehículo");
    info!("   PATCH  /api/car/location/:id - Mover vehículo");
    info!("   PATCH  /api/car/:id - Actualizar combustible");
    info!("   DELETE /api/car/:id - Eliminar vehículo (también /car/:id)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
