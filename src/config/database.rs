//! Configuración de base de datos
//!
//! Tamaño y timeouts del pool de PostgreSQL. Cada operación del store toma
//! una conexión, así que `max_connections` acota las escrituras concurrentes.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: String, env: &EnvironmentConfig) -> Self {
        Self {
            url,
            max_connections: env.db_max_connections,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(env.db_acquire_timeout_secs),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_settings_follow_environment() {
        let env = EnvironmentConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/portal".to_string()),
            "SUPABASE_JWT_SECRET" => Some("s3cret".to_string()),
            "DB_MAX_CONNECTIONS" => Some("4".to_string()),
            "DB_ACQUIRE_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        let config = DatabaseConfig::new("postgres://localhost/portal".to_string(), &env);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 0);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }
}
