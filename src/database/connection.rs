//! Conexión a PostgreSQL
//!
//! Crea el pool, aplica las migraciones de `migrations/` y expone el pool
//! al resto del servicio.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y verificar que la base de datos responde
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("could not connect to the database")?;

        info!("✅ Base de datos conectada (max {} conexiones)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        info!("📦 Aplicando migraciones");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("database migrations failed")?;
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }

    format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
}
