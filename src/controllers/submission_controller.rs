use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::dto::submission_dto::SubmissionReceipt;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::submission::{FormKind, Submission, HISTORY_LIMIT};
use crate::repositories::SubmissionStore;
use crate::services::error_reporting::{ErrorContext, ErrorReporter};
use crate::services::form_validator;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct SubmissionController {
    store: Arc<dyn SubmissionStore>,
    reporter: Arc<dyn ErrorReporter>,
}

impl SubmissionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            reporter: state.reporter.clone(),
        }
    }

    /// Validar y guardar un formulario a nombre del usuario autenticado
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        kind: FormKind,
        body: &Value,
    ) -> AppResult<SubmissionReceipt> {
        // Un formulario inválido nunca llega a la base de datos
        let submission = form_validator::validate(kind, body)?;

        let id = self
            .store
            .insert(user.user_id, submission)
            .await
            .map_err(|e| self.report(e, "submit", kind, user))?;

        info!(form = %kind, id, user_id = %user.user_id, "📝 Formulario guardado");
        Ok(SubmissionReceipt::new(kind, id))
    }

    /// Historial del usuario para un formulario, más recientes primero
    pub async fn history(&self, user: &AuthenticatedUser, kind: FormKind) -> AppResult<Vec<Submission>> {
        let records = self
            .store
            .list(kind, user.user_id, HISTORY_LIMIT)
            .await
            .map_err(|e| self.report(e, "list", kind, user))?;

        info!(form = %kind, count = records.len(), user_id = %user.user_id, "📋 Historial consultado");
        Ok(records)
    }

    fn report(&self, error: AppError, operation: &'static str, kind: FormKind, user: &AuthenticatedUser) -> AppError {
        if error.is_server_error() {
            self.reporter.capture(
                &error,
                ErrorContext {
                    operation,
                    kind: Some(kind),
                    user_id: Some(user.user_id),
                },
            );
        }
        error
    }
}
