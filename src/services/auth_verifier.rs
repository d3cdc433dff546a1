//! Verificación de credenciales
//!
//! Los tokens los emite Supabase Auth; aquí sólo se verifican. Hay dos
//! variantes: verificación local HS256 con el secreto JWT del proyecto, o
//! consulta al endpoint `/auth/v1/user` del proveedor.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    middleware::auth::AuthenticatedUser,
    utils::{
        errors::{internal_error, unauthorized_error, AppResult},
        jwt::{extract_token_from_header, validate_token_format, SupabaseClaims},
    },
};

/// Verificador de bearer tokens
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<AuthenticatedUser>;
}

/// Autenticar a partir del valor crudo del header Authorization
pub async fn authenticate(
    verifier: &dyn AuthVerifier,
    auth_header: Option<&str>,
) -> AppResult<AuthenticatedUser> {
    let auth_header = auth_header.ok_or_else(|| unauthorized_error("Authorization header is required"))?;
    let token = extract_token_from_header(auth_header)?;
    verifier.verify(token).await
}

fn parse_user_id(sub: &str) -> AppResult<Uuid> {
    Uuid::parse_str(sub).map_err(|_| unauthorized_error("Token subject is not a valid user id"))
}

/// Verificación local de access tokens HS256
pub struct JwtSecretVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSecretVerifier {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl AuthVerifier for JwtSecretVerifier {
    async fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        validate_token_format(token)?;

        let claims = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rechazado");
                unauthorized_error("Invalid or expired token")
            })?
            .claims;

        Ok(AuthenticatedUser {
            user_id: parse_user_id(&claims.sub)?,
            email: claims.email,
        })
    }
}

/// Usuario tal como lo devuelve `GET /auth/v1/user`
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verificación delegada en el proveedor de identidad
pub struct SupabaseUserVerifier {
    http_client: Client,
    user_url: String,
    api_key: String,
}

impl SupabaseUserVerifier {
    pub fn new(http_client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            user_url: format!("{}/auth/v1/user", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl AuthVerifier for SupabaseUserVerifier {
    async fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let response = self
            .http_client
            .get(&self.user_url)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "❌ Proveedor de identidad inalcanzable");
                internal_error("Identity provider request failed")
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(unauthorized_error("Invalid or expired token"));
            }
            status => {
                warn!(%status, "⚠️ Respuesta inesperada del proveedor de identidad");
                return Err(unauthorized_error("Token could not be verified"));
            }
        }

        let user: ProviderUser = response.json().await.map_err(|e| {
            warn!(error = %e, "❌ Respuesta del proveedor de identidad ilegible");
            internal_error("Identity provider returned an unreadable user")
        })?;

        Ok(AuthenticatedUser {
            user_id: parse_user_id(&user.id)?,
            email: user.email,
        })
    }
}
