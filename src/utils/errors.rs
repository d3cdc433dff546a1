//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del portal
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        fields: Vec<String>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Código estable que acompaña al mensaje en el cuerpo de error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidInput { .. } => "INVALID_INPUT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errores del lado servidor: se registran y se reportan, nunca se exponen
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let error_response = match self {
            AppError::MethodNotAllowed => ErrorResponse {
                error: "Method not allowed".to_string(),
                code,
                details: None,
            },

            AppError::Unauthorized(msg) => {
                tracing::warn!(reason = %msg, "🔒 Acceso no autorizado");
                ErrorResponse {
                    error: msg,
                    code,
                    details: None,
                }
            }

            AppError::InvalidInput { message, fields } => {
                tracing::debug!(%message, ?fields, "Datos de formulario inválidos");
                let details = if fields.is_empty() {
                    None
                } else {
                    Some(json!({ "fields": fields }))
                };
                ErrorResponse {
                    error: message,
                    code,
                    details,
                }
            }

            AppError::Validation(e) => {
                tracing::debug!(error = %e, "Error de validación");
                ErrorResponse {
                    error: "The provided data is invalid".to_string(),
                    code,
                    details: Some(json!(e)),
                }
            }

            AppError::Persistence(e) => {
                tracing::error!(error = %e, "❌ Error de base de datos");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code,
                    details: None,
                }
            }

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "❌ Error interno");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code,
                    details: None,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para campos requeridos ausentes
pub fn missing_fields_error(fields: Vec<String>) -> AppError {
    AppError::InvalidInput {
        message: "Missing required fields".to_string(),
        fields,
    }
}

/// Función helper para un campo concreto con valor inválido
pub fn invalid_field_error(field: &str, message: &str) -> AppError {
    AppError::InvalidInput {
        message: message.to_string(),
        fields: vec![field.to_string()],
    }
}

/// Función helper para errores de autenticación
pub fn unauthorized_error(message: &str) -> AppError {
    AppError::Unauthorized(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(unauthorized_error("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing_fields_error(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Persistence(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_persistence_error_does_not_leak_details() {
        let response = AppError::Persistence(sqlx::Error::Protocol("relation mids does not exist".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body should be readable");
        let body = String::from_utf8(bytes.to_vec()).expect("body should be UTF-8");
        assert!(body.contains("Internal server error"));
        assert!(!body.contains("mids"));
    }

    #[tokio::test]
    async fn test_invalid_input_lists_fields() {
        let response = missing_fields_error(vec!["date".to_string(), "time".to_string()]).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body should be readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be JSON");
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"]["fields"], json!(["date", "time"]));
    }
}
