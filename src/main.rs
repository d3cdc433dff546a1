use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use reqwest::Client;
use tokio::signal;
use tracing::{error, info, warn};

use staff_portal::{
    config::{database::DatabaseConfig, AuthMode, EnvironmentConfig, StoreBackend},
    database::DatabaseConnection,
    models::submission::FormKind,
    repositories::{MemoryStore, PgSubmissionStore, SubmissionStore},
    routes::create_router,
    services::{
        auth_verifier::{AuthVerifier, JwtSecretVerifier, SupabaseUserVerifier},
        error_reporting::TracingErrorReporter,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level: tracing::Level = config.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚌 Staff Portal - Servicio de formularios");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let store = build_store(&config).await?;
    let auth = build_verifier(&config)?;
    let reporter = Arc::new(TracingErrorReporter);

    let addr: SocketAddr = config.server_url().parse().context("invalid HOST/PORT")?;
    let app = create_router(AppState::new(config, store, auth, reporter));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    for kind in FormKind::ALL {
        info!("   POST|GET /api/submissions/{}", kind.slug());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

async fn build_store(config: &EnvironmentConfig) -> Result<Arc<dyn SubmissionStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            if config.is_production() {
                warn!("⚠️ Store en memoria en producción: los formularios no se persisten");
            }
            info!("🧠 Usando store en memoria");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .clone()
                .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
            let db = DatabaseConnection::new(&DatabaseConfig::new(url, config)).await?;
            if config.run_migrations {
                db.run_migrations().await?;
            }
            Ok(Arc::new(PgSubmissionStore::new(db.pool().clone())))
        }
    }
}

fn build_verifier(config: &EnvironmentConfig) -> Result<Arc<dyn AuthVerifier>> {
    match &config.auth {
        AuthMode::JwtSecret { secret, audience } => {
            info!("🔐 Verificando tokens con el secreto JWT");
            Ok(Arc::new(JwtSecretVerifier::new(secret, audience.as_deref())))
        }
        AuthMode::Provider { url, api_key } => {
            info!("🔐 Verificando tokens contra {}", url);
            let http_client = Client::builder()
                .build()
                .context("could not build HTTP client")?;
            Ok(Arc::new(SupabaseUserVerifier::new(http_client, url, api_key)))
        }
    }
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
