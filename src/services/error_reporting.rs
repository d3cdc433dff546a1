//! Reporte de errores
//!
//! Colaborador inyectado que recibe los fallos del lado servidor. La
//! implementación por defecto emite un evento estructurado en el target
//! `error_report`, que el subscriber de logs puede enrutar aparte.

use tracing::error;
use uuid::Uuid;

use crate::{models::submission::FormKind, utils::errors::AppError};

/// Contexto de la petición que falló.
///
/// Los fallos de autenticación ocurren antes de conocer al usuario y fuera
/// de cualquier formulario, por eso ambos campos son opcionales.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext {
    pub operation: &'static str,
    pub kind: Option<FormKind>,
    pub user_id: Option<Uuid>,
}

pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &AppError, context: ErrorContext);
}

#[derive(Debug, Default, Clone)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn capture(&self, error: &AppError, context: ErrorContext) {
        error!(
            target: "error_report",
            operation = context.operation,
            form = context.kind.map(|kind| kind.slug()),
            user_id = ?context.user_id,
            code = error.code(),
            error = %error,
            "❌ Error capturado"
        );
    }
}
