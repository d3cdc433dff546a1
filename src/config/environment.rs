//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. El parseo es una
//! función pura sobre un lookup de claves para poder testearlo sin tocar
//! el entorno del proceso.

use std::env;

use anyhow::{anyhow, bail, Result};

/// Backend de persistencia de los formularios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Cómo se verifican los bearer tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Verificación local HS256 con el secreto JWT del proyecto
    JwtSecret {
        secret: String,
        audience: Option<String>,
    },
    /// Consulta a `GET /auth/v1/user` del proveedor
    Provider { url: String, api_key: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub run_migrations: bool,
    pub auth: AuthMode,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store_backend = match get("SUBMISSION_STORE").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("SUBMISSION_STORE must be 'postgres' or 'memory', got '{}'", other),
        };

        let database_url = get("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when SUBMISSION_STORE is postgres");
        }

        let auth = match (get("SUPABASE_JWT_SECRET"), get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(secret), _, _) => AuthMode::JwtSecret {
                secret,
                // Presente pero vacía desactiva la comprobación de audiencia
                audience: match lookup("SUPABASE_JWT_AUDIENCE") {
                    None => Some("authenticated".to_string()),
                    Some(aud) if aud.trim().is_empty() => None,
                    Some(aud) => Some(aud.trim().to_string()),
                },
            },
            (None, Some(url), Some(api_key)) => AuthMode::Provider { url, api_key },
            _ => bail!("set SUPABASE_JWT_SECRET, or SUPABASE_URL and SUPABASE_ANON_KEY"),
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), 3000, "PORT")?,
            database_url,
            store_backend,
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), 10, "DB_MAX_CONNECTIONS")?,
            db_acquire_timeout_secs: parse_or(get("DB_ACQUIRE_TIMEOUT_SECS"), 30, "DB_ACQUIRE_TIMEOUT_SECS")?,
            run_migrations: parse_bool(get("RUN_MIGRATIONS"), true, "RUN_MIGRATIONS")?,
            auth,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T, key: &str) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow!("{} must be a valid number, got '{}'", key, raw)),
    }
}

fn parse_bool(value: Option<String>, default: bool, key: &str) -> Result<bool> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => bail!("{} must be a boolean, got '{}'", key, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_jwt_secret() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/portal"), ("SUPABASE_JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.store_backend, StoreBackend::Postgres);
        assert!(cfg.run_migrations);
        assert!(cfg.is_development());
        assert!(cfg.cors_origins.is_empty());
        assert_eq!(
            cfg.auth,
            AuthMode::JwtSecret {
                secret: "s3cret".to_string(),
                audience: Some("authenticated".to_string()),
            }
        );
    }

    #[test]
    fn test_provider_auth_and_memory_store() {
        let cfg = config(&[
            ("SUBMISSION_STORE", "memory"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("CORS_ORIGINS", "https://portal.example, https://staff.example"),
        ])
        .unwrap();

        assert_eq!(cfg.store_backend, StoreBackend::Memory);
        assert!(cfg.database_url.is_none());
        assert!(matches!(cfg.auth, AuthMode::Provider { .. }));
        assert_eq!(cfg.cors_origins, vec!["https://portal.example", "https://staff.example"]);
    }

    #[test]
    fn test_empty_audience_disables_check() {
        let cfg = config(&[
            ("SUBMISSION_STORE", "memory"),
            ("SUPABASE_JWT_SECRET", "s3cret"),
            ("SUPABASE_JWT_AUDIENCE", ""),
        ])
        .unwrap();
        assert!(matches!(cfg.auth, AuthMode::JwtSecret { audience: None, .. }));
    }

    #[test]
    fn test_missing_database_url_fails() {
        assert!(config(&[("SUPABASE_JWT_SECRET", "s3cret")]).is_err());
    }

    #[test]
    fn test_missing_auth_fails() {
        assert!(config(&[("SUBMISSION_STORE", "memory")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_fail() {
        assert!(config(&[("SUBMISSION_STORE", "memory"), ("SUPABASE_JWT_SECRET", "s"), ("PORT", "eighty")]).is_err());
        assert!(config(&[("SUBMISSION_STORE", "memory"), ("SUPABASE_JWT_SECRET", "s"), ("RUN_MIGRATIONS", "maybe")]).is_err());
    }
}
