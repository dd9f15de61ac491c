use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use agencia_autos::config::environment::{EnvironmentConfig, StorageBackend};
use agencia_autos::database;
use agencia_autos::routes::create_app_router;
use agencia_autos::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Agencia de Autos - API");
    info!("========================");
    info!("🌍 Entorno: {}", config.environment);

    let app_state = match (&config.storage, &config.database) {
        (StorageBackend::Postgres, Some(db_config)) => {
            let pool = database::create_pool(db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            database::run_migrations(&pool).await?;
            info!("✅ PostgreSQL conectado");
            AppState::with_pool(pool, config.clone())
        }
        _ => {
            info!("🧪 Usando almacenamiento en memoria (los datos no persisten)");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_app_router(app_state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🚗 Vehículos:");
    info!("   GET    /api/vehicles?search=&sort=price_asc|price_desc&kind=purchase|rental");
    info!("   GET    /api/vehicles/:id");
    info!("   POST   /api/vehicles");
    info!("   PUT    /api/vehicles/:id");
    info!("   PUT    /api/vehicles/:id/rent | /purchase | /available");
    info!("   DELETE /api/vehicles/:id");
    info!("👤 Clientes:");
    info!("   GET|POST /api/customers");
    info!("   GET|PUT|DELETE /api/customers/:id-o-dni");
    info!("🧾 Transacciones:");
    info!("   GET|POST /api/transactions");
    info!("   GET|PUT|DELETE /api/transactions/:id");

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
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
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
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
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
