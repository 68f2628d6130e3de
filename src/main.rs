use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use fleet_risk::api::create_app;
use fleet_risk::config::EnvironmentConfig;
use fleet_risk::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Fleet Maintenance Risk Dashboard");
    info!("===================================");
    info!("⚙️ Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_none() {
        warn!("⚠️ CORS permisivo en producción: define CORS_ORIGINS");
    }

    let state = AppState::from_config(config.clone());

    // El fichero de flota es precondición: sin él no arrancamos
    if let Err(e) = state.fleet.ensure_source_available() {
        error!("❌ {}. Ejecuta primero generate_fleet_data", e);
        return Err(e.into());
    }

    // Precargar la tabla clasificada en el cache
    let table = state.fleet.table()?;
    info!(
        "✅ {} vehículos cargados desde {} ({} depósitos)",
        table.len(),
        config.data_path.display(),
        table.depots().len()
    );

    let app = create_app(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("   GET  /api/fleet/depots - Opciones de depósito");
    info!("   GET  /api/fleet/vehicles - Vehículos filtrados (depot, risk, search)");
    info!("   GET  /api/fleet/summary - KPIs del subconjunto filtrado");
    info!("   GET  /api/fleet/charts - Datos para gráficos");
    info!("   GET  /api/fleet/download - Descargar CSV filtrado");
    info!("   GET  /api/fleet/cache/stats - Estadísticas de cache");
    info!("   POST /api/fleet/cache/clear - Limpiar cache");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
