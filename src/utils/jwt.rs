//! Utilidades JWT
//!
//! Extracción del bearer token y claims de los access tokens que emite
//! el proveedor de identidad.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{unauthorized_error, AppError};

/// Claims de un access token de Supabase
#[derive(Debug, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String, // user_id
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized_error("Authorization header must use the Bearer scheme"))?
        .trim();

    if token.is_empty() {
        return Err(unauthorized_error("Bearer token is empty"));
    }

    Ok(token)
}

/// Validar formato de token (básico)
pub fn validate_token_format(token: &str) -> Result<(), AppError> {
    if token.split('.').count() != 3 {
        return Err(unauthorized_error("Malformed bearer token"));
    }

    Ok(())
}
