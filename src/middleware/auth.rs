//! Middleware de autenticación
//!
//! Extrae el bearer token, lo verifica con el `AuthVerifier` configurado e
//! inyecta el usuario autenticado en las extensions de la request. Si la
//! verificación falla la request termina aquí con 401; si el proveedor de
//! identidad no responde, con 500 y el error se reporta.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    services::{auth_verifier::authenticate, error_reporting::ErrorContext},
    state::AppState,
    utils::errors::AppError,
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Middleware de autenticación por bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = match authenticate(state.auth.as_ref(), auth_header).await {
        Ok(user) => user,
        Err(error) => {
            if error.is_server_error() {
                state.reporter.capture(
                    &error,
                    ErrorContext {
                        operation: "authenticate",
                        kind: None,
                        user_id: None,
                    },
                );
            }
            return Err(error);
        }
    };
    debug!(user_id = %user.user_id, "🔐 Usuario autenticado");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
